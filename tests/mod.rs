mod api_tests;
mod fcm_tests;
