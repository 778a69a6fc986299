//! SolVault Wallet - a TUI front-end for Solana wallets backed by the
//! solvault key service.
//!
//! This library provides:
//! - The wallet session model (recovery phrase + derived key pairs)
//! - The backend API client for key creation and balance lookup
//! - Local storage for the persisted session

pub mod config;
pub mod domain;
pub mod infra;
