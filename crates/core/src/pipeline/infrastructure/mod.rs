pub mod background_batch_runner;
