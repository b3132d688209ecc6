//! Built-in Typst report template.

/// Default report markup with `{{PLACEHOLDER}}` markers resolved by
/// [`super::resolve`].
pub fn template() -> &'static str {
    r#"#set page(paper: "a4", margin: 2cm)
#set text(font: "New Computer Modern", size: 10pt)

#align(center)[
  #text(size: 18pt, weight: "bold")[Toxic Trading Analysis]
]

= Summary

{{SUMMARY_TABLE}}

= Data Quality

{{DATA_QUALITY}}

= Equity Curve

{{EQUITY_CURVE}}

= Holding Time Distribution

{{HOLDING_HISTOGRAM}}

= Trade Details

{{TRADE_LOG}}
"#
}
