//! Standard head-tail encoding against known byte layouts

use calldata_abi::{
    decode, decode_at, encode, encode_into, encoding_length, parse_signature, AbiError, Address,
    ParamType, TypeSpec, Value, I256, U256,
};

fn word(last: u8) -> Vec<u8> {
    let mut w = vec![0u8; 32];
    w[31] = last;
    w
}

// =============================================================================
// Concrete vectors
// =============================================================================

mod vector_tests {
    use super::*;

    #[test]
    fn uint256_one() {
        assert_eq!(encode(&["uint256"], &[Value::uint(1u64)]).unwrap(), word(1));
    }

    #[test]
    fn bool_true_and_false() {
        assert_eq!(encode(&["bool"], &[Value::Bool(true)]).unwrap(), word(1));
        assert_eq!(encode(&["bool"], &[Value::Bool(false)]).unwrap(), vec![0u8; 32]);
    }

    #[test]
    fn bytes_hi() {
        let encoded = encode(&["bytes"], &[Value::Bytes(b"hi".to_vec())]).unwrap();

        let mut expected = word(0x20); // pointer
        expected.extend(word(2)); // length
        expected.extend(b"hi");
        expected.extend([0u8; 30]);
        assert_eq!(encoded, expected);
    }

    #[test]
    fn address() {
        let encoded = encode(
            &["address"],
            &[Value::address("0x0005b7d915458ef540ade6068dfe2f44e8fa733c").unwrap()],
        )
        .unwrap();
        assert_eq!(
            hex::encode(encoded),
            "0000000000000000000000000005b7d915458ef540ade6068dfe2f44e8fa733c"
        );
    }

    #[test]
    fn short_address_is_left_padded() {
        let value = Value::address("0x1234").unwrap();
        let encoded = encode(&["address"], &[value]).unwrap();
        assert_eq!(&encoded[30..], &[0x12, 0x34]);

        let decoded = decode(&["address"], &encoded).unwrap();
        assert_eq!(
            decoded,
            vec![Value::Address(
                Address::from_hex("0x0000000000000000000000000000000000001234").unwrap()
            )]
        );
    }

    #[test]
    fn solidity_docs_example() {
        // f(uint256,uint32[],bytes10,bytes) with (0x123, [0x456, 0x789], "1234567890", "Hello, world!")
        let types = ["uint256", "uint32[]", "bytes10", "bytes"];
        let args = [
            Value::uint(0x123u64),
            Value::Array(vec![Value::uint(0x456u64), Value::uint(0x789u64)]),
            Value::FixedBytes(b"1234567890".to_vec()),
            Value::Bytes(b"Hello, world!".to_vec()),
        ];
        let encoded = encode(&types, &args).unwrap();
        let expected = concat!(
            "0000000000000000000000000000000000000000000000000000000000000123",
            "0000000000000000000000000000000000000000000000000000000000000080",
            "3132333435363738393000000000000000000000000000000000000000000000",
            "00000000000000000000000000000000000000000000000000000000000000e0",
            "0000000000000000000000000000000000000000000000000000000000000002",
            "0000000000000000000000000000000000000000000000000000000000000456",
            "0000000000000000000000000000000000000000000000000000000000000789",
            "000000000000000000000000000000000000000000000000000000000000000d",
            "48656c6c6f2c20776f726c642100000000000000000000000000000000000000",
        );
        assert_eq!(hex::encode(&encoded), expected);
        assert_eq!(decode(&types, &encoded).unwrap(), args);
    }

    #[test]
    fn nested_dynamic_arrays() {
        // g(uint256[][],string[]) with ([[1, 2], [3]], ["one", "two", "three"])
        let types = ["uint256[][]", "string[]"];
        let args = [
            Value::Array(vec![
                Value::Array(vec![Value::uint(1u64), Value::uint(2u64)]),
                Value::Array(vec![Value::uint(3u64)]),
            ]),
            Value::Array(vec![
                Value::string("one"),
                Value::string("two"),
                Value::string("three"),
            ]),
        ];
        let encoded = encode(&types, &args).unwrap();
        let expected = concat!(
            "0000000000000000000000000000000000000000000000000000000000000040",
            "0000000000000000000000000000000000000000000000000000000000000140",
            "0000000000000000000000000000000000000000000000000000000000000002",
            "0000000000000000000000000000000000000000000000000000000000000040",
            "00000000000000000000000000000000000000000000000000000000000000a0",
            "0000000000000000000000000000000000000000000000000000000000000002",
            "0000000000000000000000000000000000000000000000000000000000000001",
            "0000000000000000000000000000000000000000000000000000000000000002",
            "0000000000000000000000000000000000000000000000000000000000000001",
            "0000000000000000000000000000000000000000000000000000000000000003",
            "0000000000000000000000000000000000000000000000000000000000000003",
            "0000000000000000000000000000000000000000000000000000000000000060",
            "00000000000000000000000000000000000000000000000000000000000000a0",
            "00000000000000000000000000000000000000000000000000000000000000e0",
            "0000000000000000000000000000000000000000000000000000000000000003",
            "6f6e650000000000000000000000000000000000000000000000000000000000",
            "0000000000000000000000000000000000000000000000000000000000000003",
            "74776f0000000000000000000000000000000000000000000000000000000000",
            "0000000000000000000000000000000000000000000000000000000000000005",
            "7468726565000000000000000000000000000000000000000000000000000000",
        );
        assert_eq!(hex::encode(&encoded), expected);
        assert_eq!(decode(&types, &encoded).unwrap(), args);
    }

    #[test]
    fn static_tuple_is_inline() {
        let sig = parse_signature(&[TypeSpec::tuple(["uint8", "bool"]), TypeSpec::from("uint8")])
            .unwrap();
        assert!(sig.is_static);
        let args = [
            Value::Tuple(vec![Value::uint(1u64), Value::Bool(true)]),
            Value::uint(2u64),
        ];
        let encoded = calldata_abi::encode_params(&sig.params, &args).unwrap();
        let mut expected = word(1);
        expected.extend(word(1));
        expected.extend(word(2));
        assert_eq!(encoded, expected);
    }
}

// =============================================================================
// Two's complement boundaries
// =============================================================================

mod boundary_tests {
    use super::*;

    #[test]
    fn signed_limits_every_width() {
        for bits in (8..=256).step_by(8) {
            let ty = format!("int{bits}");
            let max = I256::max_for_bits(bits);
            let min = I256::min_for_bits(bits);

            for value in [max, min, I256::from(-1), I256::ZERO] {
                let encoded = encode(&[ty.as_str()], &[Value::Int(value)]).unwrap();
                assert_eq!(decode(&[ty.as_str()], &encoded).unwrap(), vec![Value::Int(value)]);
            }

            let above = I256::new(U256::one() << (bits - 1), false);
            assert!(matches!(
                encode(&[ty.as_str()], &[Value::Int(above)]),
                Err(AbiError::OutOfRange(_))
            ));
            let below = I256::new((U256::one() << (bits - 1)) + U256::one(), true);
            assert!(matches!(
                encode(&[ty.as_str()], &[Value::Int(below)]),
                Err(AbiError::OutOfRange(_))
            ));
        }
    }

    #[test]
    fn negative_is_full_width_twos_complement() {
        let encoded = encode(&["int8"], &[Value::int(-128)]).unwrap();
        let mut expected = vec![0xffu8; 31];
        expected.push(0x80);
        assert_eq!(encoded, expected);
    }

    #[test]
    fn unsigned_limits() {
        let max8 = Value::uint(255u64);
        assert_eq!(encode(&["uint8"], &[max8]).unwrap(), word(255));
        assert!(matches!(
            encode(&["uint8"], &[Value::uint(256u64)]),
            Err(AbiError::OutOfRange(_))
        ));
        assert!(matches!(
            encode(&["uint256"], &[Value::int(-1)]),
            Err(AbiError::OutOfRange(_))
        ));
        assert!(encode(&["uint"], &[Value::Uint(U256::MAX)]).is_ok());
    }
}

// =============================================================================
// Offsets and prefixes
// =============================================================================

mod offset_tests {
    use super::*;

    #[test]
    fn same_payload_at_offset_four() {
        let types = ["uint256", "string", "bytes2[]", "(bool,string)"];
        let args = [
            Value::uint(42u64),
            Value::string("offset independence"),
            Value::Array(vec![
                Value::FixedBytes(vec![1, 2]),
                Value::FixedBytes(vec![3, 4]),
            ]),
            Value::Tuple(vec![Value::Bool(true), Value::string("inner")]),
        ];

        let plain = encode(&types, &args).unwrap();
        let len = encoding_length(&types, &args).unwrap();
        assert_eq!(plain.len(), len);

        let mut prefixed = vec![0xde, 0xad, 0xbe, 0xef];
        prefixed.resize(4 + len, 0);
        assert_eq!(encode_into(&types, &args, &mut prefixed, 4).unwrap(), len);
        assert_eq!(&prefixed[..4], &[0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(&prefixed[4..], plain.as_slice());

        let (from_plain, head) = decode_at(&types, &plain, 0).unwrap();
        let (from_prefixed, head4) = decode_at(&types, &prefixed, 4).unwrap();
        assert_eq!(from_plain, args);
        assert_eq!(from_prefixed, args);
        assert_eq!(head, 4 * 32);
        assert_eq!(head4, head);
    }

    #[test]
    fn decode_ignores_trailing_bytes() {
        let mut data = word(7);
        data.extend([0xffu8; 16]);
        assert_eq!(decode(&["uint8"], &data).unwrap(), vec![Value::uint(7u64)]);
    }
}

// =============================================================================
// Failures
// =============================================================================

mod error_tests {
    use super::*;

    #[test]
    fn argument_count() {
        assert_eq!(
            encode(&["uint256", "bool"], &[Value::uint(1u64)]),
            Err(AbiError::ArgumentCountMismatch { expected: 2, got: 1 })
        );
    }

    #[test]
    fn non_array_for_array() {
        assert!(matches!(
            encode(&["uint256[]"], &[Value::uint(1u64)]),
            Err(AbiError::TypeMismatch { .. })
        ));
        assert!(matches!(
            encode(&["uint256[2]"], &[Value::Array(vec![Value::uint(1u64)])]),
            Err(AbiError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn wrong_fixed_byte_length() {
        assert!(matches!(
            encode(&["bytes4"], &[Value::FixedBytes(vec![1, 2, 3])]),
            Err(AbiError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn empty_dynamic_values_rejected() {
        assert!(matches!(
            encode(&["bytes"], &[Value::Bytes(Vec::new())]),
            Err(AbiError::OutOfRange(_))
        ));
        assert!(matches!(
            encode(&["string"], &[Value::string("")]),
            Err(AbiError::OutOfRange(_))
        ));
        let too_long = format!("0x{}", "11".repeat(21));
        assert!(matches!(Value::address(&too_long), Err(AbiError::OutOfRange(_))));
    }

    #[test]
    fn malformed_bool() {
        assert!(matches!(
            decode(&["bool"], &word(2)),
            Err(AbiError::MalformedInput(_))
        ));
    }

    #[test]
    fn pointer_past_end() {
        let mut data = word(0x40);
        data.extend(word(5));
        assert!(matches!(
            decode(&["string"], &data),
            Err(AbiError::MalformedInput(_))
        ));
    }

    #[test]
    fn unsupported_and_invalid_types() {
        assert!(matches!(
            encode(&["ufixed"], &[Value::uint(1u64)]),
            Err(AbiError::UnsupportedType(_))
        ));
        assert!(matches!(
            decode(&["uint256[x]"], &[0u8; 32]),
            Err(AbiError::InvalidSignature(_))
        ));
        let owned = vec![ParamType::Bool.to_string()];
        assert!(encode(&owned, &[Value::Bool(true)]).is_ok());
    }
}
