//! Talkboard - talk schedule merging and page generation for static
//! documentation sites.
//!
//! A build validates and loads the talk schedule, merges it with authored
//! talk pages, derives start instants and statistics, and synthesizes pages
//! for scheduled talks that have none. See [`build::Pipeline`].

pub mod logger;

pub mod aggregate;
pub mod build;
pub mod cli;
pub mod config;
pub mod decorate;
pub mod display;
pub mod generator;
pub mod merge;
pub mod pages;
pub mod schedule;
pub mod site;
pub mod talk;
pub mod utils;
