#![allow(dead_code)]

pub mod construct_builder;
pub mod mint_builder;
pub mod mint_to_builder;
pub mod token_account_builder;
