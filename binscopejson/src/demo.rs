//! Built-in sample documents for `--demo`.

use libscopejson::{parse_with_options, ParseOptions};
use std::io::{self, Write};

/// Samples in run order; the last three are malformed on purpose.
pub const SAMPLES: &[&str] = &[
    r#""Hello_World!""#,
    "12.12",
    "true",
    "null",
    r#"
    [
        [],
        [null, true],
        ["hello", ["WORLD", "!"]]
    ]
    "#,
    r#"
    {"menu": {
        "id": "file",
        "value": "File",
        "popup": {
            "menuitem": [
            {"value": "New", "onclick": "CreateNewDoc()"},
            {"value": "Open", "onclick": "OpenDoc()"},
            {"value": "Close", "onclick": "CloseDoc()"}
            ]
        }
    }}
    "#,
    r#"
    {
        "glossary": {
            "title": "example glossary",
            "GlossDiv": {
                "title": "S",
                "GlossList": {
                    "GlossEntry": {
                        "ID": "SGML",
                        "SortAs": "SGML",
                        "GlossTerm": "Standard Generalized Markup Language",
                        "Acronym": "SGML",
                        "Abbrev": "ISO 8879 1986",
                        "GlossDef": {
                            "para": "A meta-markup language used to create markup languages such as DocBook.",
                            "GlossSeeAlso": ["GML", "XML"]
                        },
                        "GlossSee": "markup"
                    }
                }
            }
        }
    }
    "#,
    "[1, 2]]",
    "[1, 2}",
    "{key: 1}",
];

/// Run every sample through the pipeline, reporting each one on `out`.
///
/// Returns how many samples failed to parse.
pub fn run<W: Write>(out: &mut W, options: &ParseOptions) -> io::Result<usize> {
    let mut failures = 0;
    for (i, source) in SAMPLES.iter().enumerate() {
        writeln!(out, "---------- Running test {:2} ----------", i)?;
        match parse_with_options(source, options) {
            Ok(value) => writeln!(out, "{:?}", value)?,
            Err(e) => {
                failures += 1;
                writeln!(out, ">>>>>>>>>> Error on test {:2} <<<<<<<<<", i)?;
                writeln!(out, "{}", e)?;
            }
        }
        writeln!(out)?;
    }
    Ok(failures)
}
