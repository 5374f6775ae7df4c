/// Numbered walkthrough examples.
pub mod example;
/// Marshal command.
pub mod marshal;
/// Payload parse command.
pub mod parse;
/// Unmarshal command.
pub mod unmarshal;

#[cfg(test)]
mod test_support;
mod util;
