#![no_main]

use dockframe_layout::{
    Diagnostics, SizeAttr, SizeValue, parse_declared, parse_size_value,
};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // First byte picks which attributes receive the payload.
    let Some((&mask, payload)) = data.split_first() else {
        return;
    };
    let raw = String::from_utf8_lossy(payload);

    // Accepted values re-parse to themselves through their display form.
    if let Ok(value) = parse_size_value(&raw) {
        assert_eq!(parse_size_value(&value.to_string()), Ok(value));
    }

    let attrs: Vec<(&str, &str)> = SizeAttr::ALL
        .iter()
        .enumerate()
        .filter(|(index, _)| mask & (1 << index) != 0)
        .map(|(_, attr)| (attr.name(), raw.as_ref()))
        .collect();
    let mut diagnostics = Diagnostics::new();
    let declared = parse_declared(attrs.as_slice(), None, &mut diagnostics);

    // Post-conditions that must always hold:
    for (max, min) in [
        (declared.max.width, declared.min.width),
        (declared.max.height, declared.min.height),
    ] {
        if let SizeValue::Px(max) = max {
            assert!(max >= min, "declared max {max} below min {min}");
        }
    }
    if parse_size_value(&raw).is_err() {
        assert_eq!(declared.size.width, SizeValue::Auto);
        assert_eq!(diagnostics.len(), attrs.len());
    }
});
