#![allow(dead_code)]

pub mod trainlog_env;
