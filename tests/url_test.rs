use chatmark_lib::highlight_url;
use pretty_assertions::assert_eq;

fn anchor(url: &str) -> String {
    format!(r#"<a href="{url}">{url}</a>"#)
}

#[test]
fn test_www_link_in_sentence() {
    assert_eq!(
        highlight_url("check www.example.com now"),
        "check <a href=\"www.example.com\">www.example.com</a> now"
    );
}

#[test]
fn test_no_links_unchanged() {
    for message in ["", "hello there", "example.com without prefix", "gopher://old.net"] {
        assert_eq!(highlight_url(message), message);
    }
}

#[test]
fn test_several_links_of_differing_lengths() {
    let message = "a http://x.io b https://longer.example.org/path?q=1&r=2 c www.q.de";
    let expected = format!(
        "a {} b {} c {}",
        anchor("http://x.io"),
        anchor("https://longer.example.org/path?q=1&r=2"),
        anchor("www.q.de")
    );
    assert_eq!(highlight_url(message), expected);
}

#[test]
fn test_ftp_link() {
    assert_eq!(highlight_url("ftp://files.example.org/pub"), anchor("ftp://files.example.org/pub"));
}

#[test]
fn test_url_requires_word_boundary() {
    assert_eq!(highlight_url("xwww.example.com"), "xwww.example.com");
}

#[test]
fn test_trailing_punctuation_is_part_of_url() {
    let message = "see https://a.org/x.";
    assert_eq!(highlight_url(message), format!("see {}", anchor("https://a.org/x.")));
}

#[test]
fn test_url_path_is_ascii_only() {
    let message = "https://ru.wikipedia.org/wiki/Москва";
    assert_eq!(
        highlight_url(message),
        format!("{}Москва", anchor("https://ru.wikipedia.org/wiki/"))
    );
}

#[test]
fn test_file_link_runs_to_end_of_line() {
    // Known wide match: spaces are part of file/smb links
    let message = "open file:///tmp/my file.txt please\nnext line";
    let expected = format!("open {}\nnext line", anchor("file:///tmp/my file.txt please"));
    assert_eq!(highlight_url(message), expected);
}

#[test]
fn test_file_link_stops_at_tab() {
    let message = "smb://server/share\tdone";
    assert_eq!(highlight_url(message), format!("{}\tdone", anchor("smb://server/share")));
}

#[test]
fn test_tox_id_with_digits() {
    let id = "A1b2".repeat(19);
    assert_eq!(id.len(), 76);
    let uri = format!("tox:{id}");
    assert_eq!(highlight_url(&format!("add me {uri}")), format!("add me {}", anchor(&uri)));
}

#[test]
fn test_tox_id_of_wrong_length_ignored() {
    let message = format!("tox:{}", "a".repeat(75));
    assert_eq!(highlight_url(&message), message);
}

#[test]
fn test_tox_id_longer_than_76_wraps_prefix() {
    let id = "b".repeat(80);
    let message = format!("tox:{id}");
    let expected = format!("{}{}", anchor(&format!("tox:{}", &id[..76])), &id[76..]);
    assert_eq!(highlight_url(&message), expected);
}

#[test]
fn test_mailto_link() {
    assert_eq!(
        highlight_url("mail mailto:user@example.com now"),
        format!("mail {} now", anchor("mailto:user@example.com"))
    );
}

#[test]
fn test_mailto_without_domain_dot_ignored() {
    assert_eq!(highlight_url("mailto:user@localhost"), "mailto:user@localhost");
}

#[test]
fn test_tox_name_link() {
    assert_eq!(
        highlight_url("ping tox:alice@example.org"),
        format!("ping {}", anchor("tox:alice@example.org"))
    );
}

#[test]
fn test_links_on_separate_lines() {
    let message = "www.a.com\nhttps://b.org\nmailto:c@d.ef";
    let expected = format!(
        "{}\n{}\n{}",
        anchor("www.a.com"),
        anchor("https://b.org"),
        anchor("mailto:c@d.ef")
    );
    assert_eq!(highlight_url(message), expected);
}

#[test]
fn test_unicode_spaces_belong_to_links() {
    // Only ASCII whitespace ends mailto, tox and file links
    let mailto = "mailto:a@b.c\u{a0}x";
    assert_eq!(highlight_url(mailto), anchor(mailto));

    let tox = "tox:bob@example.org\u{3000}hi";
    assert_eq!(highlight_url(&format!("{tox}\tbye")), format!("{}\tbye", anchor(tox)));

    let file = "file:///tmp/a\u{a0}b";
    assert_eq!(highlight_url(&format!("{file}\n")), format!("{}\n", anchor(file)));
}
