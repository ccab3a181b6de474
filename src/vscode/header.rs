//! Generated-file notice prepended to every output

use std::path::Path;

/// Build the notice naming the template an output was generated from
pub fn generated_header(template: &Path) -> String {
    format!(
        "// This file is a template and is automatically generated by editor-sync.\n\
         // Do not edit this file directly.\n\
         // \n\
         // Generated from: {}\n",
        template.display()
    )
}

/// Prepend the generated-file notice to a document
pub fn with_header(template: &Path, content: &str) -> String {
    let mut output = generated_header(template);
    output.push_str(content);
    output
}
