#![cfg(test)]

mod conversion;
mod inventory_file;
mod polling;
mod search;
mod support;
