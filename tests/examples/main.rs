//! Whole-document example tests.
//!
//! Parses complete game descriptions end to end and checks the full tree.

mod idle_game;
