//! Reusable test content

/// Minimal document the page counter understands
pub fn pdf_with_pages(pages: usize) -> Vec<u8> {
    let mut out = String::from("%PDF-1.5\n");
    for i in 0..pages {
        out.push_str(&format!(
            "{} 0 obj\n<< /Type /Page /Parent 1 0 R >>\nendobj\n",
            i + 2
        ));
    }
    out.push_str(&format!(
        "1 0 obj\n<< /Type /Pages /Count {} >>\nendobj\n%%EOF\n",
        pages
    ));
    out.into_bytes()
}

pub const MASTER_TEX: &str = "\\documentclass{article}\n\\begin{document}\n\\input{chapter}\n\\end{document}\n";

pub const CHAPTER_TEX: &str = "Hello, world.\n";

/// `sh -c` script that "compiles" by copying the source to `<stem>.pdf`.
/// The source file name arrives as `$0`.
pub const COPY_COMPILER: &str = "cp \"$0\" \"${0%.tex}.pdf\"";

/// `sh -c` script that fails like a TeX engine hitting an unknown macro.
/// `printf` keeps the backslash literal where `echo` (dash) would not.
pub const FAILING_COMPILER: &str =
    "echo 'This is pdfTeX'; echo '! Undefined control sequence.'; printf '%s\\n' 'l.3 \\badcmd'; echo ''; exit 1";
