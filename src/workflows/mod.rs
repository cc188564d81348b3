pub mod pruner;
