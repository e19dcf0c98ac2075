//! End-to-end rendering with the installed Graphviz `dot`.
//!
//! The generated DOT text is handed to the real backend so syntax errors in
//! the output show up as failed renders. Skipped when `dot` is not on `PATH`.

use anyhow::{Context, Result, ensure};
use assert_cmd::Command;
use std::fs;
use test_support::{DOT_ENV, dot::dot_integration_workspace};

#[test]
fn renders_build_files_to_svg() -> Result<()> {
    let temp = match dot_integration_workspace() {
        Ok(temp) => temp,
        Err(err) => {
            eprintln!("skipping test: {err}");
            return Ok(());
        }
    };
    for name in ["build.xml", "lib.xml"] {
        fs::copy(format!("tests/data/{name}"), temp.path().join(name))
            .with_context(|| format!("copy fixture {name}"))?;
    }

    let output = Command::cargo_bin("antgraph")
        .context("locate antgraph binary")?
        .current_dir(temp.path())
        .env_remove(DOT_ENV)
        .args(["-f", "svg", "-s", "spline", "-o", "graph", "build.xml", "lib.xml"])
        .output()
        .context("run antgraph with Graphviz")?;
    ensure!(
        output.status.success(),
        "antgraph failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stderr = String::from_utf8_lossy(&output.stderr);
    ensure!(
        !stderr.contains("render failed"),
        "dot rejected the generated graph: {stderr}"
    );
    let svg = fs::read_to_string(temp.path().join("graph.svg")).context("read graph.svg")?;
    ensure!(svg.contains("<svg"), "graph.svg is not SVG: {svg}");
    for label in ["dist", "jar", "docs", "Legend"] {
        ensure!(
            svg.contains(&format!(">{label}<")),
            "graph.svg should show `{label}`"
        );
    }
    Ok(())
}
