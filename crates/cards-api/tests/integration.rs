mod common;

mod topic_tests;
