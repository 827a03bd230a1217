use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{is_not, tag},
    character::complete::{char, digit1, multispace0, multispace1, none_of, one_of},
    combinator::{all_consuming, map, map_res, opt},
    error::context,
    multi::many0,
    sequence::{delimited, preceded},
};
use nom_language::error::VerboseError;

use super::Op;

/// Parses a list index
fn index(input: &str) -> IResult<&str, usize, VerboseError<&str>> {
    context("index", map_res(digit1, str::parse::<usize>)).parse(input)
}

/// Parses a double-quoted value. Inside the quotes `\"` and `\\` are unescaped, every other
/// character is taken as is.
fn quoted(input: &str) -> IResult<&str, String, VerboseError<&str>> {
    fn quoted_char(input: &str) -> IResult<&str, char, VerboseError<&str>> {
        alt((preceded(char('\\'), one_of("\\\"")), none_of("\\\""))).parse(input)
    }

    map(
        context("quoted", delimited(char('"'), many0(quoted_char), char('"'))),
        |chars| chars.into_iter().collect::<String>(),
    )
    .parse(input)
}

/// Parses an unquoted value, which extends up to the next whitespace
fn bare(input: &str) -> IResult<&str, String, VerboseError<&str>> {
    map(context("bare", is_not(" \t\r\n\"")), String::from).parse(input)
}

fn value(input: &str) -> IResult<&str, String, VerboseError<&str>> {
    context("value", alt((quoted, bare))).parse(input)
}

/// Parses a keyword which must be followed by at least one whitespace character
fn keyword<'a>(
    kw: &'static str,
) -> impl Parser<&'a str, Output = (), Error = VerboseError<&'a str>> {
    map((tag(kw), multispace1), |_| ())
}

fn op(input: &str) -> IResult<&str, Op, VerboseError<&str>> {
    context(
        "op",
        alt((
            map(preceded(keyword("get"), index), Op::Get),
            map(preceded(keyword("index"), value), Op::Index),
            map(
                (preceded(keyword("set"), index), preceded(multispace1, value)),
                |(i, v)| Op::Set(i, v),
            ),
            map(preceded(keyword("append"), value), Op::Append),
            map(
                (
                    preceded(keyword("insert"), index),
                    preceded(multispace1, value),
                ),
                |(i, v)| Op::Insert(i, v),
            ),
            map(
                preceded(tag("extend"), many0(preceded(multispace1, value))),
                Op::Extend,
            ),
            map(preceded(keyword("remove"), value), Op::Remove),
            map(
                preceded(tag("pop"), opt(preceded(multispace1, index))),
                |i| i.map_or(Op::PopLast, Op::PopAt),
            ),
            map(tag("clear"), |_| Op::Clear),
        )),
    )
    .parse(input)
}

/// Parses a single operation line. Leading and trailing whitespace is ignored.
pub fn parse_op(input: &str) -> IResult<&str, Op, VerboseError<&str>> {
    all_consuming(delimited(multispace0, op, multispace0)).parse(input)
}

#[cfg(test)]
mod test_parser_funcs {
    use super::*;

    #[test]
    fn test_parse_get() {
        assert_eq!(parse_op("get 0"), Ok(("", Op::Get(0))));
    }

    #[test]
    fn test_parse_index() {
        assert_eq!(parse_op("index lisi"), Ok(("", Op::Index("lisi".into()))));
    }

    #[test]
    fn test_parse_set_unicode() {
        assert_eq!(
            parse_op("set 1 李四"),
            Ok(("", Op::Set(1, "李四".into())))
        );
    }

    #[test]
    fn test_parse_insert() {
        assert_eq!(
            parse_op("insert 1 xiaomeim"),
            Ok(("", Op::Insert(1, "xiaomeim".into())))
        );
    }

    #[test]
    fn test_parse_extend() {
        assert_eq!(
            parse_op("extend 孙悟空 沙和尚  猪八戒 "),
            Ok((
                "",
                Op::Extend(vec!["孙悟空".into(), "沙和尚".into(), "猪八戒".into()])
            ))
        );
    }

    #[test]
    fn test_parse_pop() {
        assert_eq!(parse_op("pop"), Ok(("", Op::PopLast)));
        assert_eq!(parse_op("  pop  "), Ok(("", Op::PopLast)));
        assert_eq!(parse_op("pop 3"), Ok(("", Op::PopAt(3))));
    }

    #[test]
    fn test_parse_clear() {
        assert_eq!(parse_op("clear"), Ok(("", Op::Clear)));
    }

    #[test]
    fn test_parse_quoted() {
        assert_eq!(
            parse_op(r#"append "Sun Wukong""#),
            Ok(("", Op::Append("Sun Wukong".into())))
        );
        assert_eq!(
            parse_op(r#"remove "say \"hi\" \\o""#),
            Ok(("", Op::Remove(r#"say "hi" \o"#.into())))
        );
        assert_eq!(parse_op(r#"append """#), Ok(("", Op::Append(String::new()))));
    }

    #[test]
    fn test_parse_unknown_op() {
        assert!(parse_op("shuffle").is_err());
    }

    #[test]
    fn test_parse_missing_argument() {
        assert!(parse_op("get").is_err());
        assert!(parse_op("set 1").is_err());
    }

    #[test]
    fn test_parse_extend_empty() {
        assert_eq!(parse_op("extend"), Ok(("", Op::Extend(vec![]))));
        assert_eq!(parse_op("extend  "), Ok(("", Op::Extend(vec![]))));
        assert!(parse_op("extendx").is_err());
    }

    #[test]
    fn test_parse_negative_index() {
        assert!(parse_op("pop -1").is_err());
        assert!(parse_op("get -1").is_err());
    }

    #[test]
    fn test_parse_trailing_garbage() {
        assert!(parse_op("clear all").is_err());
        assert!(parse_op("popx").is_err());
        assert!(parse_op("remove a b").is_err());
    }

    #[test]
    fn test_parse_unterminated_quote() {
        assert!(parse_op(r#"append "foo"#).is_err());
    }
}
