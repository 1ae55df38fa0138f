pub mod stage1_group;
pub mod stage2_merge;
pub mod stage3_report;
