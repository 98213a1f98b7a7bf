use guideflow::markup::{
    embedded_anchors, external_links, next_targets, popup_keys, to_plain_text, EmbeddedAnchor,
    ExternalLink,
};

#[test]
fn embedded_anchors_take_plain_text_labels() {
    let html = r#"<p>Either <a href="" data-next="check_scope"><strong>scope</strong> it</a>
        or <span data-next='__back__'></span>.</p>"#;

    assert_eq!(
        embedded_anchors(html),
        vec![
            EmbeddedAnchor {
                label: "scope it".to_string(),
                target: "check_scope".to_string(),
            },
            EmbeddedAnchor {
                label: "__back__".to_string(),
                target: "__back__".to_string(),
            },
        ]
    );
}

#[test]
fn external_links_need_http_or_blank_target() {
    let html = r##"<a href="https://example.org/a">Regulator</a>
        <a href="/local" target="_blank">Local copy</a>
        <a href="#" data-popup="one-month">one month</a>
        <a href="https://example.org/b"><img src="x.png"></a>"##;

    assert_eq!(
        external_links(html),
        vec![
            ExternalLink {
                href: "https://example.org/a".to_string(),
                label: "Regulator".to_string(),
            },
            ExternalLink {
                href: "/local".to_string(),
                label: "Local copy".to_string(),
            },
            ExternalLink {
                href: "https://example.org/b".to_string(),
                label: "link".to_string(),
            },
        ]
    );
}

#[test]
fn scanners_ignore_markup_without_attributes() {
    let html = "<p>No links here.</p>";

    assert!(next_targets(html).is_empty());
    assert!(popup_keys(html).is_empty());
    assert!(embedded_anchors(html).is_empty());
    assert!(external_links(html).is_empty());
    assert_eq!(to_plain_text(html), "No links here.");
}

#[test]
fn plain_text_decodes_entities_and_line_breaks() {
    assert_eq!(
        to_plain_text("Tom &amp; Jerry<br/>&lt;b&gt; stays &quot;text&quot;"),
        "Tom & Jerry\n<b> stays \"text\""
    );
}
