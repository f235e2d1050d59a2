/// Token kinds produced by the scanner.
///
/// Values are stable `u16`s so syntax tree nodes can store either a token kind
/// or a node kind (`protoget_parser::syntax_kind_ext`) in the same field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u16)]
pub enum SyntaxKind {
    Unknown = 0,
    EndOfFileToken,

    // Literals and names
    Identifier,
    IntLiteral,
    FloatLiteral,
    RuneLiteral,
    StringLiteral,

    // Punctuation
    OpenParenToken,
    CloseParenToken,
    OpenBraceToken,
    CloseBraceToken,
    OpenBracketToken,
    CloseBracketToken,
    CommaToken,
    DotToken,
    DotDotDotToken,
    SemicolonToken,
    ColonToken,

    // Operators
    PlusToken,
    MinusToken,
    AsteriskToken,
    SlashToken,
    PercentToken,
    AmpersandToken,
    BarToken,
    CaretToken,
    AmpersandCaretToken,
    LessThanLessThanToken,
    GreaterThanGreaterThanToken,
    ExclamationToken,
    LessThanToken,
    LessThanEqualsToken,
    GreaterThanToken,
    GreaterThanEqualsToken,
    EqualsEqualsToken,
    ExclamationEqualsToken,
    AmpersandAmpersandToken,
    BarBarToken,
    PlusPlusToken,
    MinusMinusToken,
    /// `<-`, channel send and receive.
    LessThanMinusToken,

    // Assignment operators
    EqualsToken,
    ColonEqualsToken,
    PlusEqualsToken,
    MinusEqualsToken,
    AsteriskEqualsToken,
    SlashEqualsToken,
    PercentEqualsToken,
    AmpersandEqualsToken,
    BarEqualsToken,
    CaretEqualsToken,
    AmpersandCaretEqualsToken,
    LessThanLessThanEqualsToken,
    GreaterThanGreaterThanEqualsToken,

    // Keywords
    BreakKeyword,
    CaseKeyword,
    ChanKeyword,
    ConstKeyword,
    ContinueKeyword,
    DefaultKeyword,
    DeferKeyword,
    ElseKeyword,
    FallthroughKeyword,
    ForKeyword,
    FuncKeyword,
    GoKeyword,
    GotoKeyword,
    IfKeyword,
    ImportKeyword,
    InterfaceKeyword,
    MapKeyword,
    PackageKeyword,
    RangeKeyword,
    ReturnKeyword,
    SelectKeyword,
    StructKeyword,
    SwitchKeyword,
    TypeKeyword,
    VarKeyword,
}

impl SyntaxKind {
    /// Last token kind; node kinds are numbered after it.
    pub const LAST_TOKEN: SyntaxKind = SyntaxKind::VarKeyword;

    pub fn from_keyword(text: &str) -> Option<SyntaxKind> {
        use SyntaxKind::*;
        Some(match text {
            "break" => BreakKeyword,
            "case" => CaseKeyword,
            "chan" => ChanKeyword,
            "const" => ConstKeyword,
            "continue" => ContinueKeyword,
            "default" => DefaultKeyword,
            "defer" => DeferKeyword,
            "else" => ElseKeyword,
            "fallthrough" => FallthroughKeyword,
            "for" => ForKeyword,
            "func" => FuncKeyword,
            "go" => GoKeyword,
            "goto" => GotoKeyword,
            "if" => IfKeyword,
            "import" => ImportKeyword,
            "interface" => InterfaceKeyword,
            "map" => MapKeyword,
            "package" => PackageKeyword,
            "range" => RangeKeyword,
            "return" => ReturnKeyword,
            "select" => SelectKeyword,
            "struct" => StructKeyword,
            "switch" => SwitchKeyword,
            "type" => TypeKeyword,
            "var" => VarKeyword,
            _ => return None,
        })
    }

    /// Convert a stored `u16` back into a token kind.
    pub fn from_u16(value: u16) -> Option<SyntaxKind> {
        if value > SyntaxKind::LAST_TOKEN as u16 {
            return None;
        }
        ALL_KINDS.get(value as usize).copied()
    }

    pub fn is_keyword(self) -> bool {
        self >= SyntaxKind::BreakKeyword && self <= SyntaxKind::LAST_TOKEN
    }

    pub fn is_literal(self) -> bool {
        matches!(
            self,
            SyntaxKind::IntLiteral
                | SyntaxKind::FloatLiteral
                | SyntaxKind::RuneLiteral
                | SyntaxKind::StringLiteral
        )
    }

    /// Source text of punctuation, operator and keyword tokens.
    pub fn text(self) -> Option<&'static str> {
        use SyntaxKind::*;
        Some(match self {
            OpenParenToken => "(",
            CloseParenToken => ")",
            OpenBraceToken => "{",
            CloseBraceToken => "}",
            OpenBracketToken => "[",
            CloseBracketToken => "]",
            CommaToken => ",",
            DotToken => ".",
            DotDotDotToken => "...",
            SemicolonToken => ";",
            ColonToken => ":",
            PlusToken => "+",
            MinusToken => "-",
            AsteriskToken => "*",
            SlashToken => "/",
            PercentToken => "%",
            AmpersandToken => "&",
            BarToken => "|",
            CaretToken => "^",
            AmpersandCaretToken => "&^",
            LessThanLessThanToken => "<<",
            GreaterThanGreaterThanToken => ">>",
            ExclamationToken => "!",
            LessThanToken => "<",
            LessThanEqualsToken => "<=",
            GreaterThanToken => ">",
            GreaterThanEqualsToken => ">=",
            EqualsEqualsToken => "==",
            ExclamationEqualsToken => "!=",
            AmpersandAmpersandToken => "&&",
            BarBarToken => "||",
            PlusPlusToken => "++",
            MinusMinusToken => "--",
            LessThanMinusToken => "<-",
            EqualsToken => "=",
            ColonEqualsToken => ":=",
            PlusEqualsToken => "+=",
            MinusEqualsToken => "-=",
            AsteriskEqualsToken => "*=",
            SlashEqualsToken => "/=",
            PercentEqualsToken => "%=",
            AmpersandEqualsToken => "&=",
            BarEqualsToken => "|=",
            CaretEqualsToken => "^=",
            AmpersandCaretEqualsToken => "&^=",
            LessThanLessThanEqualsToken => "<<=",
            GreaterThanGreaterThanEqualsToken => ">>=",
            BreakKeyword => "break",
            CaseKeyword => "case",
            ChanKeyword => "chan",
            ConstKeyword => "const",
            ContinueKeyword => "continue",
            DefaultKeyword => "default",
            DeferKeyword => "defer",
            ElseKeyword => "else",
            FallthroughKeyword => "fallthrough",
            ForKeyword => "for",
            FuncKeyword => "func",
            GoKeyword => "go",
            GotoKeyword => "goto",
            IfKeyword => "if",
            ImportKeyword => "import",
            InterfaceKeyword => "interface",
            MapKeyword => "map",
            PackageKeyword => "package",
            RangeKeyword => "range",
            ReturnKeyword => "return",
            SelectKeyword => "select",
            StructKeyword => "struct",
            SwitchKeyword => "switch",
            TypeKeyword => "type",
            VarKeyword => "var",
            Unknown | EndOfFileToken | Identifier | IntLiteral | FloatLiteral | RuneLiteral
            | StringLiteral => return None,
        })
    }

    pub fn is_assignment_operator(self) -> bool {
        use SyntaxKind::*;
        matches!(
            self,
            EqualsToken
                | ColonEqualsToken
                | PlusEqualsToken
                | MinusEqualsToken
                | AsteriskEqualsToken
                | SlashEqualsToken
                | PercentEqualsToken
                | AmpersandEqualsToken
                | BarEqualsToken
                | CaretEqualsToken
                | AmpersandCaretEqualsToken
                | LessThanLessThanEqualsToken
                | GreaterThanGreaterThanEqualsToken
        )
    }

    /// Binary operator precedence, Go numbering (5 binds tightest).
    pub fn binary_precedence(self) -> Option<u8> {
        use SyntaxKind::*;
        match self {
            AsteriskToken
            | SlashToken
            | PercentToken
            | LessThanLessThanToken
            | GreaterThanGreaterThanToken
            | AmpersandToken
            | AmpersandCaretToken => Some(5),
            PlusToken | MinusToken | BarToken | CaretToken => Some(4),
            EqualsEqualsToken
            | ExclamationEqualsToken
            | LessThanToken
            | LessThanEqualsToken
            | GreaterThanToken
            | GreaterThanEqualsToken => Some(3),
            AmpersandAmpersandToken => Some(2),
            BarBarToken => Some(1),
            _ => None,
        }
    }

    pub fn is_unary_operator(self) -> bool {
        use SyntaxKind::*;
        matches!(
            self,
            PlusToken
                | MinusToken
                | ExclamationToken
                | CaretToken
                | AsteriskToken
                | AmpersandToken
                | LessThanMinusToken
        )
    }

    /// Tokens after which a newline ends the statement.
    pub fn ends_statement_at_newline(self) -> bool {
        use SyntaxKind::*;
        matches!(
            self,
            Identifier
                | IntLiteral
                | FloatLiteral
                | RuneLiteral
                | StringLiteral
                | CloseParenToken
                | CloseBracketToken
                | CloseBraceToken
                | PlusPlusToken
                | MinusMinusToken
                | BreakKeyword
                | ContinueKeyword
                | FallthroughKeyword
                | ReturnKeyword
        )
    }
}

const ALL_KINDS: [SyntaxKind; SyntaxKind::LAST_TOKEN as usize + 1] = {
    use SyntaxKind::*;
    [
        Unknown,
        EndOfFileToken,
        Identifier,
        IntLiteral,
        FloatLiteral,
        RuneLiteral,
        StringLiteral,
        OpenParenToken,
        CloseParenToken,
        OpenBraceToken,
        CloseBraceToken,
        OpenBracketToken,
        CloseBracketToken,
        CommaToken,
        DotToken,
        DotDotDotToken,
        SemicolonToken,
        ColonToken,
        PlusToken,
        MinusToken,
        AsteriskToken,
        SlashToken,
        PercentToken,
        AmpersandToken,
        BarToken,
        CaretToken,
        AmpersandCaretToken,
        LessThanLessThanToken,
        GreaterThanGreaterThanToken,
        ExclamationToken,
        LessThanToken,
        LessThanEqualsToken,
        GreaterThanToken,
        GreaterThanEqualsToken,
        EqualsEqualsToken,
        ExclamationEqualsToken,
        AmpersandAmpersandToken,
        BarBarToken,
        PlusPlusToken,
        MinusMinusToken,
        LessThanMinusToken,
        EqualsToken,
        ColonEqualsToken,
        PlusEqualsToken,
        MinusEqualsToken,
        AsteriskEqualsToken,
        SlashEqualsToken,
        PercentEqualsToken,
        AmpersandEqualsToken,
        BarEqualsToken,
        CaretEqualsToken,
        AmpersandCaretEqualsToken,
        LessThanLessThanEqualsToken,
        GreaterThanGreaterThanEqualsToken,
        BreakKeyword,
        CaseKeyword,
        ChanKeyword,
        ConstKeyword,
        ContinueKeyword,
        DefaultKeyword,
        DeferKeyword,
        ElseKeyword,
        FallthroughKeyword,
        ForKeyword,
        FuncKeyword,
        GoKeyword,
        GotoKeyword,
        IfKeyword,
        ImportKeyword,
        InterfaceKeyword,
        MapKeyword,
        PackageKeyword,
        RangeKeyword,
        ReturnKeyword,
        SelectKeyword,
        StructKeyword,
        SwitchKeyword,
        TypeKeyword,
        VarKeyword,
    ]
};
