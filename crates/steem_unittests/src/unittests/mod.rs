mod key_tests;
mod operation_tests;
