#![allow(non_snake_case)]
#![allow(non_upper_case_globals)]

pub mod accumulator;
pub mod errors;
pub mod glrss;
pub mod gsrss;
pub mod keys;
pub mod schemes;
pub mod utils;
