//! XML report emission.
//!
//! The reporter consumes an immutable [`AnalysisResult`] and writes the
//! `<report>` document: an `<information>` block with software, timing,
//! method and model-feature metadata, then `<results>` with one
//! `<sum-of-products>` whose `<product>` children mirror the MCS list
//! exactly: same order, no rounding.

use std::io::Write;

use chrono::{Local, SecondsFormat};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use thiserror::Error;

use scram_tree::FaultTree;

use crate::result::AnalysisResult;
use crate::settings::Settings;

/// Failures at the report boundary. This is the only place where I/O
/// errors can surface out of the engine.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to write the report: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode the report: {0}")]
    Xml(#[from] quick_xml::Error),
}

/// Writes the XML report for one analyzed fault tree.
pub fn write_report<W: Write>(
    tree: &FaultTree,
    settings: &Settings,
    result: &AnalysisResult,
    out: W,
) -> Result<(), ReportError> {
    let mut writer = Writer::new_with_indent(out, b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    writer.write_event(Event::Start(BytesStart::new("report")))?;
    write_information(&mut writer, tree, settings, result)?;
    write_results(&mut writer, tree, result)?;
    writer.write_event(Event::End(BytesEnd::new("report")))?;
    Ok(())
}

fn write_information<W: Write>(
    writer: &mut Writer<W>,
    tree: &FaultTree,
    settings: &Settings,
    result: &AnalysisResult,
) -> Result<(), ReportError> {
    writer.write_event(Event::Start(BytesStart::new("information")))?;

    let mut software = BytesStart::new("software");
    software.push_attribute(("name", "SCRAM"));
    software.push_attribute(("version", env!("CARGO_PKG_VERSION")));
    writer.write_event(Event::Empty(software))?;

    write_text_element(
        writer,
        "time",
        &Local::now().to_rfc3339_opts(SecondsFormat::Secs, true),
    )?;

    let mut quantities = BytesStart::new("calculated-quantities");
    quantities.push_attribute(("name", "MCS"));
    quantities.push_attribute(("definition", "minimal groups of events for failure"));
    quantities.push_attribute(("approximation", settings.approximation.label()));
    writer.write_event(Event::Empty(quantities))?;

    let mut methods = BytesStart::new("calculation-methods");
    methods.push_attribute(("name", "MOCUS"));
    writer.write_event(Event::Start(methods))?;
    writer.write_event(Event::Start(BytesStart::new("limits")))?;
    write_text_element(writer, "limit-order", &settings.limit_order.to_string())?;
    write_text_element(writer, "number-of-sums", &settings.num_sums.to_string())?;
    write_text_element(writer, "cut-off", &settings.cut_off.to_string())?;
    writer.write_event(Event::End(BytesEnd::new("limits")))?;
    let analysis_ms = result.timings.generation_ms
        + result.timings.minimization_ms
        + result.timings.probability_ms
        + result.timings.importance_ms;
    write_text_element(writer, "calculation-time-ms", &analysis_ms.to_string())?;
    writer.write_event(Event::End(BytesEnd::new("calculation-methods")))?;

    writer.write_event(Event::Start(BytesStart::new("model-features")))?;
    write_text_element(writer, "gates", &tree.num_gates().to_string())?;
    write_text_element(writer, "basic-events", &tree.num_basic_events().to_string())?;
    write_text_element(writer, "house-events", &tree.num_house_events().to_string())?;
    writer.write_event(Event::End(BytesEnd::new("model-features")))?;

    write_text_element(writer, "model-fingerprint", &result.model_fingerprint)?;

    for warning in &result.warnings {
        write_text_element(writer, "warning", warning)?;
    }

    writer.write_event(Event::End(BytesEnd::new("information")))?;
    Ok(())
}

fn write_results<W: Write>(
    writer: &mut Writer<W>,
    tree: &FaultTree,
    result: &AnalysisResult,
) -> Result<(), ReportError> {
    writer.write_event(Event::Start(BytesStart::new("results")))?;

    let top_name = tree
        .top_gate()
        .map(|gate| gate.name.clone())
        .unwrap_or_default();
    let mut sop = BytesStart::new("sum-of-products");
    sop.push_attribute(("name", top_name.as_str()));
    sop.push_attribute((
        "basic-events",
        tree.num_basic_events().to_string().as_str(),
    ));
    sop.push_attribute(("products", result.mcs.len().to_string().as_str()));
    if let Some(prob) = &result.probability {
        sop.push_attribute(("probability", prob.total.to_string().as_str()));
    }
    writer.write_event(Event::Start(sop))?;

    for (i, cut_set) in result.mcs.iter().enumerate() {
        let mut product = BytesStart::new("product");
        product.push_attribute(("order", cut_set.order().to_string().as_str()));
        if let Some(prob) = &result.probability {
            product.push_attribute(("probability", prob.per_mcs[i].to_string().as_str()));
        }
        writer.write_event(Event::Start(product))?;
        for literal in &cut_set.literals {
            let name = tree
                .basic_event(&literal.event)
                .map(|event| event.name.as_str())
                .unwrap_or(literal.event.as_str());
            let mut element = BytesStart::new("basic-event");
            element.push_attribute(("name", name));
            if literal.complement {
                writer.write_event(Event::Start(BytesStart::new("not")))?;
                writer.write_event(Event::Empty(element))?;
                writer.write_event(Event::End(BytesEnd::new("not")))?;
            } else {
                writer.write_event(Event::Empty(element))?;
            }
        }
        writer.write_event(Event::End(BytesEnd::new("product")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("sum-of-products")))?;
    writer.write_event(Event::End(BytesEnd::new("results")))?;
    Ok(())
}

fn write_text_element<W: Write>(
    writer: &mut Writer<W>,
    name: &str,
    text: &str,
) -> Result<(), ReportError> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}
