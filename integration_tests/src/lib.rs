mod properties;
mod tests;
mod testutils;
