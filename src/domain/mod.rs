pub mod result_store;
pub mod scenario;
pub mod scenario_store;
pub mod simulation_result;
