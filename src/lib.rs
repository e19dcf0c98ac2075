//! Antgraph core library.
//!
//! This library parses Ant build files into [`ast::Project`] models, assembles
//! them into a target graph, and renders that graph through Graphviz.

pub mod ast;
pub mod cli;
pub mod dot_gen;
pub mod ir;
pub mod project;
pub mod runner;
