//! Voice Skill - Spoken questions answered by a language model
//!
//! This crate receives voice platform request envelopes, keeps a short
//! conversation history in the session, asks a completion backend for an
//! answer and speaks it back.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
