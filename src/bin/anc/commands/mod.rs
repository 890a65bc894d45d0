pub mod algorithms;
pub mod batch;
pub mod info;
pub mod run;
pub mod validate;
