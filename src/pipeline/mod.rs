pub mod stage2_label;
pub mod stage3_groups;
pub mod stage4_predict;
pub mod stage5_metrics;
pub mod stage6_parity;
pub mod stage7_report;
