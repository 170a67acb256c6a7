//! Property-based tests for color parsing, opacity extraction and the transform.

use opacity_fallback::color::{parse_color, parse_hex, Rgb};
use opacity_fallback::selector::extract_opacity;
use opacity_fallback::{apply, Options, Rule, Stylesheet};
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

fn hex_digit() -> impl Strategy<Value = char> {
    prop::sample::select("0123456789abcdefABCDEF".chars().collect::<Vec<_>>())
}

fn separator() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![", ", ",", " "])
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    /// `#rgb` and its digit-doubled `#rrggbb` name the same color.
    #[test]
    fn short_hex_matches_doubled_form(r in hex_digit(), g in hex_digit(), b in hex_digit()) {
        let short = format!("#{}{}{}", r, g, b);
        let long = format!("#{r}{r}{g}{g}{b}{b}");
        prop_assert!(parse_color(&short).is_some());
        prop_assert_eq!(parse_color(&short), parse_color(&long));
    }

    /// Alpha digits never change the triplet.
    #[test]
    fn hex_alpha_is_ignored(rgb in any::<(u8, u8, u8)>(), a in any::<u8>()) {
        let opaque = format!("{:02x}{:02x}{:02x}", rgb.0, rgb.1, rgb.2);
        let with_alpha = format!("{}{:02x}", opaque, a);
        prop_assert_eq!(parse_hex(&opaque), Some(Rgb(rgb.0, rgb.1, rgb.2)));
        prop_assert_eq!(parse_hex(&with_alpha), parse_hex(&opaque));
        prop_assert_eq!(parse_color(&format!("#{}", with_alpha)), parse_hex(&opaque));
    }

    /// rgb() channels are rounded and clamped, independent of separator style.
    #[test]
    fn rgb_channels_clamped_and_rounded(
        r in -500.0f64..500.0,
        g in -500.0f64..500.0,
        b in -500.0f64..500.0,
        sep in separator(),
        alpha in proptest::option::of(0.0f64..1.0),
    ) {
        let tail = alpha.map(|a| format!(" / {:.2}", a)).unwrap_or_default();
        let literal = format!("rgb({:.2}{sep}{:.2}{sep}{:.2}{})", r, g, b, tail);

        let expected = |v: f64| {
            let printed: f64 = format!("{:.2}", v).parse().unwrap();
            printed.round().clamp(0.0, 255.0) as u8
        };
        prop_assert_eq!(
            parse_color(&literal),
            Some(Rgb(expected(r), expected(g), expected(b)))
        );
    }

    /// Any percentage suffix maps to pct / 100 within [0, 1].
    #[test]
    fn opacity_in_unit_range(pct in 0u32..1000) {
        let alpha = extract_opacity(&format!(".bg-x\\/{}", pct));
        prop_assert_eq!(alpha, Some(f64::from(pct.min(100)) / 100.0));
    }

    /// Selectors without a slash never carry an opacity.
    #[test]
    fn no_slash_no_opacity(selector in "[.a-z0-9:_ -]{0,40}") {
        prop_assert_eq!(extract_opacity(&selector), None);
    }

    /// A second run never adds declarations or rules.
    #[test]
    fn transform_is_idempotent(
        colors in prop::collection::vec(any::<(u8, u8, u8)>(), 1..6),
        pct in 1u32..100,
    ) {
        let mut root = Rule::new(":root");
        let mut dark = Rule::new(".dark");
        let mut sheet = Stylesheet::new();
        for (i, c) in colors.iter().enumerate() {
            root = root.declare(format!("--c{}", i), format!("rgb({}, {}, {})", c.0, c.1, c.2));
            dark = dark.declare(format!("--c{}", i), format!("#{:02x}{:02x}{:02x}", c.2, c.1, c.0));
        }
        sheet = sheet.with(root).with(dark);
        for i in 0..colors.len() {
            sheet = sheet.with(Rule::new(format!(".text-c{}\\/{}", i, pct)).declare("color", format!("var(--c{})", i)));
        }

        let first = apply(&mut sheet, &Options::default());
        prop_assert_eq!(first.declarations_rewritten, colors.len());
        prop_assert_eq!(first.dark_overrides, colors.len());

        let once = sheet.to_css();
        let second = apply(&mut sheet, &Options::default());
        prop_assert!(second.is_noop());
        prop_assert_eq!(sheet.to_css(), once);
    }
}
