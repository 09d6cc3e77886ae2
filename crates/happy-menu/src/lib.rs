//! Nutrition scoring, texture and diet classification, and ranking over a
//! fast-food menu export, with console and dashboard screens on top.

pub mod config;
pub mod dashboard;
pub mod dataset;
pub mod error;
pub mod features;
pub mod input;
pub mod ranking;
pub mod scoring;
pub mod screens;
pub mod telemetry;
