pub mod structures;
pub mod waterfall;

pub use structures::{
    recommend_structures, templates, StructureKind, StructureRecommendation, StructureTemplate,
    TermSheet,
};
pub use waterfall::{
    annual_summary_table, debt_schedule, generate_waterfall, AnnualSummaryRow, DebtScheduleRow,
    Waterfall,
};
