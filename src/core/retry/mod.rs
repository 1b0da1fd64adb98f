pub mod retry;

pub use retry::RetryPolicy;

#[cfg(test)]
mod tests;
