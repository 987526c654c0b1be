use crate::{BytecodeProvider, TokenKind};

#[test]
fn reference_tables_are_consistent() {
    let provider = BytecodeProvider::reference(13);

    assert_eq!(provider.bytecode_version(), 13);
    assert_eq!(provider.token_kind(0), Some(TokenKind::Empty));
    assert_eq!(provider.token_kind(1), Some(TokenKind::Identifier));

    // Ordinal lookup is the inverse of the kind table.
    for ordinal in 0..100 {
        let Some(kind) = provider.token_kind(ordinal) else {
            break;
        };
        assert_eq!(provider.token_ordinal(kind), Some(ordinal));
    }
}

#[test]
fn token_ordinals_fit_in_seven_bits() {
    // The single-byte token cell only has 7 bits for the ordinal.
    let provider = BytecodeProvider::reference(13);
    let mut count = 0;
    while provider.token_kind(count).is_some() {
        count += 1;
    }
    assert!(count <= 0x80, "token table too large for the cell encoding");
}

#[test]
fn type_name_lookup() {
    let provider = BytecodeProvider::reference(13);

    assert_eq!(provider.type_name(0), Some("Nil"));
    assert_eq!(provider.type_ordinal("Nil"), Some(0));
    assert_eq!(
        provider.type_ordinal("Vector2"),
        provider
            .type_name(provider.type_ordinal("Vector2").unwrap())
            .and_then(|_| provider.type_ordinal("Vector2"))
    );
    assert_eq!(provider.type_name(999), None);
}

#[test]
fn builtin_lists_are_indexable() {
    let provider = BytecodeProvider::reference(13);

    assert_eq!(provider.builtin_func_name(0), Some("sin"));
    assert!(provider.builtin_types().contains(&"Vector2".to_owned()));
    assert_eq!(provider.builtin_func_name(100_000), None);
}

#[test]
fn descriptor_roundtrips_through_json() {
    let provider = BytecodeProvider::reference(100);
    let spec = crate::ProviderSpec {
        data: provider.data().clone(),
        token_kinds: (0..)
            .map_while(|i| provider.token_kind(i))
            .collect(),
        type_names: (0..)
            .map_while(|i| provider.type_name(i).map(str::to_owned))
            .collect(),
        builtin_types: provider.builtin_types().to_vec(),
        builtin_funcs: provider.builtin_funcs().to_vec(),
    };

    let json = serde_json::to_string(&spec).unwrap();
    let parsed: crate::ProviderSpec = serde_json::from_str(&json).unwrap();
    let rebuilt = BytecodeProvider::from(parsed);

    assert_eq!(rebuilt.bytecode_version(), 100);
    assert_eq!(rebuilt.token_kind(2), Some(TokenKind::Constant));
    assert_eq!(rebuilt.type_name(4), Some("String"));
}
