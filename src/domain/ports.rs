use crate::utils::error::Result;

/// Line-oriented prompt I/O used by the session. Implementations re-prompt on
/// malformed input themselves; callers only see well-formed values or
/// `RegistryError::InputClosed`.
pub trait Terminal {
    fn read_line(&mut self, prompt: &str) -> Result<String>;
    fn read_int(&mut self, prompt: &str) -> Result<i32>;
    fn read_f64(&mut self, prompt: &str) -> Result<f64>;
    fn read_yes_no(&mut self, prompt: &str) -> Result<bool>;
    fn print(&mut self, text: &str) -> Result<()>;
}

pub trait ConfigProvider {
    fn roll_seed(&self) -> u32;
}
