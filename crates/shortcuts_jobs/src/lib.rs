pub mod executable;
pub mod identifier_allocator;
pub mod job_engine;
pub mod task;
pub mod task_registry;
