use std::{fmt::Display, rc::Rc};

use crate::{
    lexer::prelude::{Spanned, Token},
    parser::prelude::{parse_error, Parse, ParseError, ParseErrorType, Parser},
    utils::prelude::SrcSpan
};

const STATEMENT_STARTS: [&str; 5] = ["`soni`", "`chop`", "`agar`", "`funksiya`", "`qaytar`"];

// program -> { <statement> } EOF
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub statements: Vec<Statement>,
    pub location: SrcSpan
}

impl<T: Iterator<Item = Spanned>> Parse<T> for Program {
    fn parse(parser: &mut Parser<T>) -> Result<Self, ParseError> {
        let mut statements = vec![];

        while !matches!(parser.current_token, Some((_, Token::Eof, _)) | None) {
            statements.push(Statement::parse(parser)?);
        }

        let end = parser.current_span().end;

        Ok(Self {
            statements,
            location: SrcSpan { start: 0, end }
        })
    }
}

impl Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let statements = self.statements.iter()
            .map(|statement| statement.to_string())
            .collect::<Vec<String>>();

        write!(f, "{}", statements.join("\n"))
    }
}

// statement -> <variable_declaration> | <print> | <if> | <function_definition> | <return>
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    VariableDeclaration(VariableDeclaration),
    Print(PrintStatement),
    If(IfStatement),
    FunctionDefinition(Rc<FunctionDefinition>),
    Return(ReturnStatement),
}

impl<T: Iterator<Item = Spanned>> Parse<T> for Statement {
    fn parse(parser: &mut Parser<T>) -> Result<Self, ParseError> {
        let res = match &parser.current_token {
            Some((start, token, end)) => match token {
                Token::Var => Self::VariableDeclaration(VariableDeclaration::parse(parser)?),
                Token::Print => Self::Print(PrintStatement::parse(parser)?),
                Token::If => Self::If(IfStatement::parse(parser)?),
                Token::Function => Self::FunctionDefinition(Rc::new(FunctionDefinition::parse(parser)?)),
                Token::Return => Self::Return(ReturnStatement::parse(parser)?),
                _ => return parse_error(
                    ParseErrorType::UnexpectedToken {
                        token: token.clone(),
                        expected: STATEMENT_STARTS.iter().map(|s| s.to_string()).collect()
                    },
                    SrcSpan { start: *start, end: *end }
                )
            },
            None => return parse_error(
                ParseErrorType::UnexpectedEof,
                SrcSpan { start: 0, end: 0 }
            )
        };

        Ok(res)
    }
}

impl Display for Statement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::VariableDeclaration(declaration) => write!(f, "{declaration}"),
            Self::Print(print) => write!(f, "{print}"),
            Self::If(conditional) => write!(f, "{conditional}"),
            Self::FunctionDefinition(function) => write!(f, "{function}"),
            Self::Return(ret) => write!(f, "{ret}"),
        }
    }
}

impl Statement {
    pub fn location(&self) -> SrcSpan {
        match self {
            Self::VariableDeclaration(declaration) => declaration.location,
            Self::Print(print) => print.location,
            Self::If(conditional) => conditional.location,
            Self::FunctionDefinition(function) => function.location,
            Self::Return(ret) => ret.location,
        }
    }
}

// block -> { {<statement>} }
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub statements: Vec<Statement>,
    pub location: SrcSpan
}

impl<T: Iterator<Item = Spanned>> Parse<T> for Block {
    fn parse(parser: &mut Parser<T>) -> Result<Self, ParseError> {
        parser.nested(Self::parse_statements)
    }
}

impl Block {
    fn parse_statements<T: Iterator<Item = Spanned>>(parser: &mut Parser<T>) -> Result<Self, ParseError> {
        let (start, _) = parser.expect_one(Token::LBrace)?;

        let mut statements = vec![];

        while !parser.current_is(&Token::RBrace) {
            if let Some((start, Token::Eof, end)) = &parser.current_token {
                let expected = STATEMENT_STARTS.iter()
                    .map(|s| s.to_string())
                    .chain(std::iter::once("`}`".to_string()))
                    .collect();

                return parse_error(
                    ParseErrorType::UnexpectedToken { token: Token::Eof, expected },
                    SrcSpan { start: *start, end: *end }
                );
            }

            statements.push(Statement::parse(parser)?);
        }

        let (_, end) = parser.expect_one(Token::RBrace)?;

        Ok(Self {
            statements,
            location: SrcSpan { start, end }
        })
    }
}

impl Display for Block {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.statements.is_empty() {
            return write!(f, "{{ }}");
        }

        let statements = self.statements.iter()
            .map(|statement| statement.to_string())
            .collect::<Vec<String>>();

        write!(f, "{{ {} }}", statements.join(" "))
    }
}

// variable_declaration -> soni <identifier> = <expression> ;
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDeclaration {
    pub name: Identifier,
    pub value: Expression,
    pub location: SrcSpan
}

impl<T: Iterator<Item = Spanned>> Parse<T> for VariableDeclaration {
    fn parse(parser: &mut Parser<T>) -> Result<Self, ParseError> {
        let (start, _) = parser.expect_one(Token::Var)?;

        let name = Identifier::from(parser.expect_ident()?);

        parser.expect_one(Token::Assign)?;

        let value = Expression::parse(parser)?;

        let (_, end) = parser.expect_one(Token::Semicolon)?;

        Ok(Self {
            name,
            value,
            location: SrcSpan { start, end }
        })
    }
}

impl Display for VariableDeclaration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "soni {} = {};", self.name, self.value)
    }
}

// print -> chop <expression> ;
#[derive(Debug, Clone, PartialEq)]
pub struct PrintStatement {
    pub expression: Expression,
    pub location: SrcSpan
}

impl<T: Iterator<Item = Spanned>> Parse<T> for PrintStatement {
    fn parse(parser: &mut Parser<T>) -> Result<Self, ParseError> {
        let (start, _) = parser.expect_one(Token::Print)?;

        let expression = Expression::parse(parser)?;

        let (_, end) = parser.expect_one(Token::Semicolon)?;

        Ok(Self {
            expression,
            location: SrcSpan { start, end }
        })
    }
}

impl Display for PrintStatement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "chop {};", self.expression)
    }
}

// if -> agar ( <expression> ) <block> [aks <block>]
#[derive(Debug, Clone, PartialEq)]
pub struct IfStatement {
    pub condition: Expression,
    pub then_block: Block,
    pub else_block: Option<Block>,
    pub location: SrcSpan
}

impl<T: Iterator<Item = Spanned>> Parse<T> for IfStatement {
    fn parse(parser: &mut Parser<T>) -> Result<Self, ParseError> {
        let (start, _) = parser.expect_one(Token::If)?;

        parser.expect_one(Token::LParen)?;
        let condition = Expression::parse(parser)?;
        parser.expect_one(Token::RParen)?;

        let then_block = Block::parse(parser)?;
        let mut end = then_block.location.end;

        let else_block = if parser.current_is(&Token::Else) {
            parser.step();

            let else_block = Block::parse(parser)?;
            end = else_block.location.end;

            Some(else_block)
        } else {
            None
        };

        Ok(Self {
            condition,
            then_block,
            else_block,
            location: SrcSpan { start, end }
        })
    }
}

impl Display for IfStatement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "agar ({}) {}", self.condition, self.then_block)?;

        match &self.else_block {
            Some(else_block) => write!(f, " aks {else_block}"),
            None => Ok(())
        }
    }
}

// function_definition -> funksiya <identifier> ( [<identifier> {, <identifier>}] ) <block>
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDefinition {
    pub name: Identifier,
    pub parameters: Vec<Identifier>,
    pub body: Block,
    pub location: SrcSpan
}

impl<T: Iterator<Item = Spanned>> Parse<T> for FunctionDefinition {
    fn parse(parser: &mut Parser<T>) -> Result<Self, ParseError> {
        let (start, _) = parser.expect_one(Token::Function)?;

        let name = Identifier::from(parser.expect_ident()?);

        let (parameters, _) = parser.parse_delimited(
            Token::LParen,
            Token::RParen,
            |parser| parser.expect_ident().map(Identifier::from)
        )?;

        let body = Block::parse(parser)?;
        let end = body.location.end;

        Ok(Self {
            name,
            parameters,
            body,
            location: SrcSpan { start, end }
        })
    }
}

impl Display for FunctionDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parameters = self.parameters.iter()
            .map(|param| param.to_string())
            .collect::<Vec<String>>();

        write!(f, "funksiya {}({}) {}", self.name, parameters.join(", "), self.body)
    }
}

// return -> qaytar <expression> ;
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStatement {
    pub expression: Expression,
    pub location: SrcSpan
}

impl<T: Iterator<Item = Spanned>> Parse<T> for ReturnStatement {
    fn parse(parser: &mut Parser<T>) -> Result<Self, ParseError> {
        let (start, _) = parser.expect_one(Token::Return)?;

        let expression = Expression::parse(parser)?;

        let (_, end) = parser.expect_one(Token::Semicolon)?;

        Ok(Self {
            expression,
            location: SrcSpan { start, end }
        })
    }
}

impl Display for ReturnStatement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "qaytar {};", self.expression)
    }
}

// expression -> <additive> [<comparison_operator> <additive>]
// additive -> <multiplicative> {(+ | -) <multiplicative>}
// multiplicative -> <primary> {(* | /) <primary>}
// primary -> <int> | <string> | <identifier> | <call> | ( <expression> ) | <list>
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Integer {
        value: i64,
        location: SrcSpan
    },
    Str {
        value: String,
        location: SrcSpan
    },
    Variable(Identifier),
    Binary(BinaryOperation),
    Call(FunctionCall),
    List(ListExpression),
}

impl<T: Iterator<Item = Spanned>> Parse<T> for Expression {
    fn parse(parser: &mut Parser<T>) -> Result<Self, ParseError> {
        parser.nested(|parser| {
            let left = Self::parse_additive(parser)?;

            match operator_at(parser, Token::is_comparison) {
                Some(operator) => {
                    parser.step();
                    let right = Self::parse_additive(parser)?;

                    Ok(Self::binary(left, operator, right))
                },
                None => Ok(left)
            }
        })
    }
}

impl Expression {
    fn parse_additive<T: Iterator<Item = Spanned>>(parser: &mut Parser<T>) -> Result<Self, ParseError> {
        let mut expr = Self::parse_multiplicative(parser)?;

        while let Some(operator) = operator_at(parser, Token::is_additive) {
            parser.step();
            let right = Self::parse_multiplicative(parser)?;

            expr = Self::binary(expr, operator, right);
        }

        Ok(expr)
    }

    fn parse_multiplicative<T: Iterator<Item = Spanned>>(parser: &mut Parser<T>) -> Result<Self, ParseError> {
        let mut expr = Self::parse_primary(parser)?;

        while let Some(operator) = operator_at(parser, Token::is_multiplicative) {
            parser.step();
            let right = Self::parse_primary(parser)?;

            expr = Self::binary(expr, operator, right);
        }

        Ok(expr)
    }

    fn parse_primary<T: Iterator<Item = Spanned>>(parser: &mut Parser<T>) -> Result<Self, ParseError> {
        let (start, token, end) = match &parser.current_token {
            Some(spanned) => spanned.clone(),
            None => return parse_error(
                ParseErrorType::UnexpectedEof,
                SrcSpan { start: 0, end: 0 }
            )
        };

        let location = SrcSpan { start, end };

        match token {
            Token::Int(value) => {
                parser.step();
                Ok(Self::Integer { value, location })
            },
            Token::Str(value) => {
                parser.step();
                Ok(Self::Str { value, location })
            },
            Token::Ident(_) if parser.next_is(&Token::LParen) => {
                Ok(Self::Call(FunctionCall::parse(parser)?))
            },
            Token::Ident(_) => Ok(Self::Variable(Identifier::from(parser.expect_ident()?))),
            Token::LParen => {
                parser.step();
                let expression = Self::parse(parser)?;
                parser.expect_one(Token::RParen)?;

                Ok(expression)
            },
            Token::LSBracket => Ok(Self::List(ListExpression::parse(parser)?)),
            token => parse_error(
                ParseErrorType::UnexpectedToken {
                    token,
                    expected: vec![
                        "an Int".to_string(),
                        "a String".to_string(),
                        "an Identifier".to_string(),
                        "`(`".to_string(),
                        "`[`".to_string(),
                    ]
                },
                location
            )
        }
    }

    fn binary(left: Expression, operator: BinaryOperator, right: Expression) -> Self {
        let location = left.location().merge(right.location());

        Self::Binary(BinaryOperation {
            operator,
            left: Box::new(left),
            right: Box::new(right),
            location
        })
    }

    pub fn location(&self) -> SrcSpan {
        match self {
            Self::Integer { location, .. }
            | Self::Str { location, .. } => *location,
            Self::Variable(ident) => ident.location,
            Self::Binary(binary) => binary.location,
            Self::Call(call) => call.location,
            Self::List(list) => list.location,
        }
    }
}

fn operator_at<T: Iterator<Item = Spanned>>(
    parser: &Parser<T>,
    accepts: fn(&Token) -> bool
) -> Option<BinaryOperator> {
    match &parser.current_token {
        Some((_, token, _)) if accepts(token) => BinaryOperator::from_token(token),
        _ => None
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer { value, .. } => write!(f, "{value}"),
            Self::Str { value, .. } => write!(f, "\"{value}\""),
            Self::Variable(ident) => write!(f, "{ident}"),
            Self::Binary(binary) => write!(f, "{binary}"),
            Self::Call(call) => write!(f, "{call}"),
            Self::List(list) => write!(f, "{list}"),
        }
    }
}

// identifier -> (<letter> | _) {<letter> | <digit> | _}
#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    pub value: String,
    pub location: SrcSpan
}

impl Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl From<(u32, String, u32)> for Identifier {
    fn from(value: (u32, String, u32)) -> Self {
        Identifier {
            value: value.1,
            location: SrcSpan { start: value.0, end: value.2 }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Equal,
    NotEqual,
    Less,
    LessOrEqual,
    Greater,
    GreaterOrEqual,
}

impl BinaryOperator {
    pub fn from_token(token: &Token) -> Option<Self> {
        Some(match token {
            Token::Plus => Self::Add,
            Token::Minus => Self::Subtract,
            Token::Mult => Self::Multiply,
            Token::Div => Self::Divide,
            Token::Equal => Self::Equal,
            Token::NotEqual => Self::NotEqual,
            Token::LessThan => Self::Less,
            Token::LessThanOrEqual => Self::LessOrEqual,
            Token::GreaterThan => Self::Greater,
            Token::GreaterThanOrEqual => Self::GreaterOrEqual,
            _ => return None
        })
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::Less => "<",
            Self::LessOrEqual => "<=",
            Self::Greater => ">",
            Self::GreaterOrEqual => ">=",
        }
    }

    pub fn precedence(&self) -> u8 {
        match self {
            Self::Multiply | Self::Divide => 3,
            Self::Add | Self::Subtract => 2,
            _ => 1,
        }
    }

    pub fn is_comparison(&self) -> bool {
        self.precedence() == 1
    }
}

impl Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

// binary -> <expression> <operator> <expression>
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryOperation {
    pub operator: BinaryOperator,
    pub left: Box<Expression>,
    pub right: Box<Expression>,
    pub location: SrcSpan
}

impl Display for BinaryOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let precedence = self.operator.precedence();

        // left operand binds tighter unless it is a chained comparison
        let left = match self.left.as_ref() {
            Expression::Binary(inner) if inner.operator.precedence() < precedence
                || (inner.operator.precedence() == precedence && self.operator.is_comparison()) => {
                format!("({})", self.left)
            },
            _ => self.left.to_string()
        };

        let right = match self.right.as_ref() {
            Expression::Binary(inner) if inner.operator.precedence() <= precedence => {
                format!("({})", self.right)
            },
            _ => self.right.to_string()
        };

        write!(f, "{left} {} {right}", self.operator)
    }
}

// call -> <identifier> ( [<expression> {, <expression>}] )
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    pub name: Identifier,
    pub arguments: Vec<Expression>,
    pub location: SrcSpan
}

impl<T: Iterator<Item = Spanned>> Parse<T> for FunctionCall {
    fn parse(parser: &mut Parser<T>) -> Result<Self, ParseError> {
        let name = Identifier::from(parser.expect_ident()?);
        let start = name.location.start;

        let (arguments, span) = parser.parse_delimited(
            Token::LParen,
            Token::RParen,
            |parser| Expression::parse(parser)
        )?;

        Ok(Self {
            name,
            arguments,
            location: SrcSpan { start, end: span.end }
        })
    }
}

impl Display for FunctionCall {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let arguments = self.arguments.iter()
            .map(|arg| arg.to_string())
            .collect::<Vec<String>>();

        write!(f, "{}({})", self.name, arguments.join(", "))
    }
}

// list -> [ [<expression> {, <expression>}] ]
#[derive(Debug, Clone, PartialEq)]
pub struct ListExpression {
    pub elements: Vec<Expression>,
    pub location: SrcSpan
}

impl<T: Iterator<Item = Spanned>> Parse<T> for ListExpression {
    fn parse(parser: &mut Parser<T>) -> Result<Self, ParseError> {
        let (elements, location) = parser.parse_delimited(
            Token::LSBracket,
            Token::RSBracket,
            |parser| Expression::parse(parser)
        )?;

        Ok(Self {
            elements,
            location
        })
    }
}

impl Display for ListExpression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let elements = self.elements.iter()
            .map(|element| element.to_string())
            .collect::<Vec<String>>();

        write!(f, "[{}]", elements.join(", "))
    }
}
