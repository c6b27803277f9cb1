
mod fraud_check_tests;
mod status_tests;
