#[allow(non_snake_case)]
pub mod Digester;
#[allow(non_snake_case)]
pub mod Examples;
#[allow(non_snake_case)]
pub mod Interfaces;
#[allow(non_snake_case)]
pub mod Utils;
