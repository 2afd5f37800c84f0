pub mod base_commands;
pub mod project_cmd;
pub mod report_format;
pub mod scenario_cmd;
pub mod show_cmd;
pub mod simulate_cmd;
