pub mod studio_runtime;
