//! Output formats for a parsed response.

use std::io::Write;

use anyhow::Result;
use tomcat_manager_core::ManagerResponse;

/// Debug dump, failure flag and the raw summary.
pub fn text(out: &mut impl Write, response: &ManagerResponse) -> Result<()> {
    writeln!(out, "{response:#?}")?;
    writeln!(out, "Command Failed: {}", response.is_failure())?;
    writeln!(out, "Summary:")?;
    write!(out, "{}", response.summary())?;
    if !response.summary().ends_with('\n') {
        writeln!(out)?;
    }
    Ok(())
}

pub fn json(out: &mut impl Write, response: &ManagerResponse) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, response)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = "OK - Listed applications for virtual host localhost\n/:running:0:ROOT\n";

    #[test]
    fn text_ends_with_summary() {
        let resp = ManagerResponse::parse("list", BODY);
        let mut out = Vec::new();
        text(&mut out, &resp).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("Command Failed: false\nSummary:\n"));
        assert!(out.ends_with(BODY));
    }

    #[test]
    fn text_reports_failure() {
        let resp = ManagerResponse::parse("stop", "FAIL - No context exists for path /x");
        let mut out = Vec::new();
        text(&mut out, &resp).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("Command Failed: true"));
        assert!(out.ends_with("FAIL - No context exists for path /x\n"));
    }

    #[test]
    fn json_contains_tuples() {
        let resp = ManagerResponse::parse("list", BODY);
        let mut out = Vec::new();
        json(&mut out, &resp).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["failed"], false);
        assert_eq!(value["tuples"][0]["name"], "ROOT");
        assert_eq!(value["tuples"][0]["sessions"], "0");
    }
}
