#![allow(dead_code)]

pub mod hasher;

pub use hasher::{CountingHasher, StaticHasher, entries};
