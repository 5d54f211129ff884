use super::*;

fn tokens(data: &str) -> Vec<Token> {
    let mut t = Tokenizer::new(data);
    let mut out = Vec::new();
    loop {
        let tok = t.next_token();
        let done = tok.is_eos();
        out.push(tok);
        if done {
            return out;
        }
    }
}

#[test]
fn words_numbers_and_line_ends() {
    let mut t = Tokenizer::new("probe rgba 1 -2 3.5\nclear");
    assert_eq!(t.next_token(), Token::String("probe".into()));
    assert_eq!(t.next_token().as_str(), "rgba");

    let one = t.next_token();
    assert!(one.is_integer());
    assert_eq!(one.as_u32(), 1);

    let minus_two = t.next_token();
    assert!(minus_two.is_negative());
    assert_eq!(minus_two.as_i32(), -2);
    assert_eq!(minus_two.to_original_string(), "-2");

    let f = t.next_token();
    assert!(f.is_double());
    assert_eq!(f.as_f64(), 3.5);

    assert_eq!(t.current_line(), 1);
    assert!(t.next_token().is_eol());
    assert_eq!(t.current_line(), 2);
    assert_eq!(t.next_token().as_str(), "clear");
    assert!(t.next_token().is_eos());
}

#[test]
fn hex_and_exponents() {
    let toks = tokens("0xff 1e3 2.5E-1 .5");
    assert_eq!(toks[0].as_u64(), 255);
    assert!(toks[0].is_integer());
    assert!(toks[1].is_double());
    assert_eq!(toks[1].as_f64(), 1000.0);
    assert_eq!(toks[2].as_f64(), 0.25);
    assert_eq!(toks[3].as_f64(), 0.5);
}

#[test]
fn trailing_text_splits_off_numbers() {
    let toks = tokens("2% 3:6");
    assert_eq!(toks[0].as_u32(), 2);
    assert_eq!(toks[1], Token::String("%".into()));
    assert_eq!(toks[2].as_u32(), 3);
    assert_eq!(toks[3], Token::String(":6".into()));
}

#[test]
fn brackets_and_commas_are_separate_tokens() {
    let toks = tokens("(1,2)");
    assert!(toks[0].is_open_bracket());
    assert!(toks[2].is_comma());
    assert!(toks[4].is_close_bracket());
    assert!(toks[5].is_eos());
}

#[test]
fn comments_continuations_and_crlf() {
    let mut t = Tokenizer::new("a # ignored\r\nb \\\r\nc\nd");
    assert_eq!(t.next_token().as_str(), "a");
    assert!(t.next_token().is_eol());
    assert_eq!(t.next_token().as_str(), "b");
    assert_eq!(t.next_token().as_str(), "c");
    assert_eq!(t.current_line(), 3);
    assert!(t.next_token().is_eol());
    assert_eq!(t.next_token().as_str(), "d");
}

#[test]
fn quoted_strings_handle_escapes() {
    let toks = tokens(r#""a b\t\"c\"" x"#);
    assert_eq!(toks[0], Token::String("a b\t\"c\"".into()));
    assert_eq!(toks[1].as_str(), "x");
}

#[test]
fn quoted_strings_spanning_lines_advance_the_line() {
    let mut t = Tokenizer::new("\"a\nb\" x\ny \"c\\nd\" z");
    assert_eq!(t.next_token(), Token::String("a\nb".into()));
    assert_eq!(t.current_line(), 2);
    assert_eq!(t.next_token().as_str(), "x");
    assert!(t.next_token().is_eol());
    assert_eq!(t.next_token().as_str(), "y");
    assert_eq!(t.current_line(), 3);

    // An escaped newline is content, not a line break.
    assert_eq!(t.next_token(), Token::String("c\nd".into()));
    assert_eq!(t.current_line(), 3);

    let mut open = Tokenizer::new("\"never\nclosed\n");
    assert_eq!(open.next_token(), Token::String("never\nclosed\n".into()));
    assert_eq!(open.current_line(), 3);
}

#[test]
fn peek_does_not_consume() {
    let mut t = Tokenizer::new("one\ntwo");
    assert_eq!(t.peek_next_token().as_str(), "one");
    assert_eq!(t.next_token().as_str(), "one");
    assert!(t.peek_next_token().is_eol());
    assert_eq!(t.current_line(), 1);
}

#[test]
fn extract_to_next_tracks_lines() {
    let mut t = Tokenizer::new("body\nmore\n[next]");
    assert_eq!(t.extract_to_next("["), "body\nmore\n");
    assert_eq!(t.current_line(), 3);
    assert_eq!(t.next_token().as_str(), "[next]");
}

#[test]
fn convert_to_double() {
    let mut tok = Tokenizer::new("-7").next_token();
    tok.convert_to_double().unwrap();
    assert_eq!(tok.as_f64(), -7.0);

    let mut big = Token::Integer {
        value: u64::MAX,
        negative: false,
        text: "18446744073709551615".into(),
    };
    assert!(big.convert_to_double().is_err());
    assert!(Token::Eol.clone().convert_to_double().is_err());
}

#[test]
fn nan_is_a_double() {
    let tok = Tokenizer::new("NaN").next_token();
    assert!(tok.is_double());
    assert!(tok.as_f64().is_nan());
}
