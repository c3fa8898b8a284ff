// Classification: free text → controlled-vocabulary codes

pub mod department;
pub mod division;
pub mod fields;

pub use department::{classify_department, resolve_department, DepartmentResolution, ResolutionSource};
pub use division::{canonicalize_division, department_for_division};
pub use fields::{
    classify_automation_priority, classify_criticality, classify_frequency, classify_regulation,
    classify_routine, classify_task_type, is_already_automated,
};
