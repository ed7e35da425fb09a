mod common;
mod multipart_tests;
