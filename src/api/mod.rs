/*!
 * API Module
 * Async surface over the temp manager
 */

pub mod async_temp;

pub use async_temp::AsyncTemp;
