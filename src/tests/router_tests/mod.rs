mod auth_tests;
mod intake_tests;
mod scenario_tests;
