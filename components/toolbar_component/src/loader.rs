//! Bootstrap loader script and its injection into profiled pages

/// Client-side script that fetches and mounts the rendered toolbar
pub const LOADER_SCRIPT: &str = include_str!("../assets/toolbarloader.js");

/// `<script>` tag that loads [`LOADER_SCRIPT`] for snapshot `id`
pub fn loader_tag(loader_url: &str, loader_marker: &str, time_marker: &str, id: &str) -> String {
    format!(
        "<script type=\"text/javascript\" id=\"debugbar_loader\" data-time=\"{}\" data-marker=\"{}\" src=\"{}?{}\"></script>",
        id, time_marker, loader_url, loader_marker
    )
}

/// Insert `tag` before the last `</body>`, or append it when there is none
pub fn inject_before_body_end(body: &[u8], tag: &str) -> Vec<u8> {
    const CLOSE: &[u8] = b"</body>";

    let position = body
        .windows(CLOSE.len())
        .rposition(|window| window.eq_ignore_ascii_case(CLOSE));

    let mut output = Vec::with_capacity(body.len() + tag.len());
    match position {
        Some(index) => {
            output.extend_from_slice(&body[..index]);
            output.extend_from_slice(tag.as_bytes());
            output.extend_from_slice(&body[index..]);
        }
        None => {
            output.extend_from_slice(body);
            output.extend_from_slice(tag.as_bytes());
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loader_script_reads_tag() {
        assert!(LOADER_SCRIPT.contains("debugbar_loader"));
        assert!(LOADER_SCRIPT.contains("data-time"));
    }

    #[test]
    fn test_loader_tag() {
        let tag = loader_tag("/", "debugbar", "debugbar_time", "123");
        assert_eq!(
            tag,
            "<script type=\"text/javascript\" id=\"debugbar_loader\" data-time=\"123\" \
             data-marker=\"debugbar_time\" src=\"/?debugbar\"></script>"
        );
    }

    #[test]
    fn test_inject_before_body_end() {
        let out = inject_before_body_end(b"<html><body><p>hi</p></BODY></html>", "<s></s>");
        assert_eq!(out, b"<html><body><p>hi</p><s></s></BODY></html>".to_vec());
    }

    #[test]
    fn test_inject_without_body_end() {
        let out = inject_before_body_end(b"<p>fragment</p>", "<s></s>");
        assert_eq!(out, b"<p>fragment</p><s></s>".to_vec());
    }
}
