pub mod permutations;
