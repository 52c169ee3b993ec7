#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // (<буква>|_){<буква>|<цифра>|_}
    Ident(String),
    // {/ <цифра> /}
    Int(i64),
    // " {<символ>} "
    Str(String),

    // Ключевые слова
    Var, // soni
    Print, // chop
    If, // agar
    Else, // aks
    Function, // funksiya
    Return, // qaytar

    // Операции группы сложения
    Plus, // +
    Minus, // -

    // Операции группы умножения
    Mult, // *
    Div, // /

    // Операции группы отношения
    Equal, // ==
    NotEqual, // !=
    LessThan, // <
    LessThanOrEqual, // <=
    GreaterThan, // >
    GreaterThanOrEqual, // >=

    // Операция присваивания
    Assign, // =

    // Прочие разделители
    Comma, // ,
    Semicolon, // ;
    LParen, // (
    RParen, // )
    LBrace, // {
    RBrace, // }
    LSBracket, // [
    RSBracket, // ]

    Eof,
}

impl Token {
    pub fn is_reserved_word(&self) -> bool {
        matches!(
            self,
            Token::Var
            | Token::Print
            | Token::If
            | Token::Else
            | Token::Function
            | Token::Return
        )
    }

    pub fn is_additive(&self) -> bool {
        matches!(self, Token::Plus | Token::Minus)
    }

    pub fn is_multiplicative(&self) -> bool {
        matches!(self, Token::Mult | Token::Div)
    }

    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            Token::Equal
            | Token::NotEqual
            | Token::LessThan
            | Token::LessThanOrEqual
            | Token::GreaterThan
            | Token::GreaterThanOrEqual
        )
    }

    pub fn as_literal(&self) -> String {
        match self {
            Token::Ident(value) => value.clone(),
            Token::Int(value) => value.to_string(),
            Token::Str(value) => format!("\"{value}\""),

            Token::Var => "soni".to_string(),
            Token::Print => "chop".to_string(),
            Token::If => "agar".to_string(),
            Token::Else => "aks".to_string(),
            Token::Function => "funksiya".to_string(),
            Token::Return => "qaytar".to_string(),

            Token::Plus => "+".to_string(),
            Token::Minus => "-".to_string(),
            Token::Mult => "*".to_string(),
            Token::Div => "/".to_string(),
            Token::Equal => "==".to_string(),
            Token::NotEqual => "!=".to_string(),
            Token::LessThan => "<".to_string(),
            Token::LessThanOrEqual => "<=".to_string(),
            Token::GreaterThan => ">".to_string(),
            Token::GreaterThanOrEqual => ">=".to_string(),
            Token::Assign => "=".to_string(),

            Token::Comma => ",".to_string(),
            Token::Semicolon => ";".to_string(),
            Token::LParen => "(".to_string(),
            Token::RParen => ")".to_string(),
            Token::LBrace => "{".to_string(),
            Token::RBrace => "}".to_string(),
            Token::LSBracket => "[".to_string(),
            Token::RSBracket => "]".to_string(),

            Token::Eof => "end of file".to_string(),
        }
    }

    /// Human readable kind, used when reporting what the parser found.
    pub fn describe(&self) -> String {
        match self {
            Token::Int(_) => "an Int".to_string(),
            Token::Str(_) => "a String".to_string(),
            Token::Ident(_) => "an Identifier".to_string(),
            Token::Eof => "the end of file".to_string(),
            _ if self.is_reserved_word() => format!("the keyword `{}`", self.as_literal()),
            _ => format!("`{}`", self.as_literal()),
        }
    }
}
