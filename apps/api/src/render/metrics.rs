//! Static width tables for the two standard PDF fonts the renderer uses.
//!
//! Widths are the Adobe AFM advance widths in 1/1000 em. Tables cover
//! ASCII 0x20..=0x7E (95 printable characters); index = (char as usize) - 32.
//! Anything outside that range measures as `average_width`.

/// Standard Type 1 fonts available in every PDF reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Font {
    Helvetica,
    HelveticaBold,
}

impl Font {
    /// PostScript name used in the font dictionary.
    pub fn base_name(self) -> &'static str {
        match self {
            Font::Helvetica => "Helvetica",
            Font::HelveticaBold => "Helvetica-Bold",
        }
    }

    /// Resource name used inside content streams.
    pub fn resource(self) -> &'static str {
        match self {
            Font::Helvetica => "F1",
            Font::HelveticaBold => "F2",
        }
    }

    pub fn metrics(self) -> &'static FontMetricTable {
        match self {
            Font::Helvetica => &HELVETICA_TABLE,
            Font::HelveticaBold => &HELVETICA_BOLD_TABLE,
        }
    }
}

/// Width array slot layout:
/// ```text
/// [0]=sp  [1]=!   [2]="   [3]=#   [4]=$   [5]=%   [6]=&   [7]='
/// [8]=(   [9]=)   [10]=*  [11]=+  [12]=,  [13]=-  [14]=.  [15]=/
/// [16..25]=0-9
/// [26]=:  [27]=;  [28]=<  [29]==  [30]=>  [31]=?  [32]=@
/// [33..58]=A-Z
/// [59]=[  [60]=\  [61]=]  [62]=^  [63]=_  [64]=`
/// [65..90]=a-z
/// [91]={  [92]=|  [93]=}  [94]=~
/// ```
pub struct FontMetricTable {
    widths: [u16; 95],
    pub average_width: u16,
}

impl FontMetricTable {
    /// Rendered width of `s` in points at `size`.
    pub fn measure_str(&self, s: &str, size: f64) -> f64 {
        let units: u32 = s
            .chars()
            .map(|c| {
                let code = c as usize;
                if (32..=126).contains(&code) {
                    u32::from(self.widths[code - 32])
                } else {
                    u32::from(self.average_width)
                }
            })
            .sum();
        f64::from(units) * size / 1000.0
    }
}

static HELVETICA_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp   !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
        278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
        // 0    1    2    3    4    5    6    7    8    9
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
        // :    ;    <    =    >    ?    @
        278, 278, 584, 584, 584, 556, 1015,
        // A    B    C    D    E    F    G    H    I    J    K    L    M
        667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
        // N    O    P    Q    R    S    T    U    V    W    X    Y    Z
        722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
        // [    \    ]    ^    _    `
        278, 278, 278, 469, 556, 333,
        // a    b    c    d    e    f    g    h    i    j    k    l    m
        556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
        // n    o    p    q    r    s    t    u    v    w    x    y    z
        556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
        // {    |    }    ~
        334, 260, 334, 584,
    ],
    average_width: 556,
};

static HELVETICA_BOLD_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp   !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
        278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
        // 0    1    2    3    4    5    6    7    8    9
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
        // :    ;    <    =    >    ?    @
        333, 333, 584, 584, 584, 611, 975,
        // A    B    C    D    E    F    G    H    I    J    K    L    M
        722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
        // N    O    P    Q    R    S    T    U    V    W    X    Y    Z
        722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
        // [    \    ]    ^    _    `
        333, 278, 333, 584, 556, 333,
        // a    b    c    d    e    f    g    h    i    j    k    l    m
        556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
        // n    o    p    q    r    s    t    u    v    w    x    y    z
        611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
        // {    |    }    ~
        389, 280, 389, 584,
    ],
    average_width: 556,
};

/// One word of a paragraph together with the font it is set in.
#[derive(Debug, Clone, PartialEq)]
pub struct Word {
    pub text: String,
    pub font: Font,
}

/// Greedy word wrap at `max_width` points. Returns lines of words; a word
/// wider than the line gets a line of its own.
pub fn wrap_words(words: &[Word], size: f64, max_width: f64) -> Vec<Vec<Word>> {
    let mut lines: Vec<Vec<Word>> = Vec::new();
    let mut current: Vec<Word> = Vec::new();
    let mut current_width = 0.0_f64;

    for word in words {
        let word_w = word.font.metrics().measure_str(&word.text, size);
        if current.is_empty() {
            current_width = word_w;
            current.push(word.clone());
            continue;
        }
        let space_w = word.font.metrics().measure_str(" ", size);
        if current_width + space_w + word_w > max_width {
            lines.push(std::mem::take(&mut current));
            current_width = word_w;
        } else {
            current_width += space_w + word_w;
        }
        current.push(word.clone());
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Width of a wrapped line including inter-word spaces.
pub fn line_width(line: &[Word], size: f64) -> f64 {
    line.iter()
        .enumerate()
        .map(|(i, word)| {
            let metrics = word.font.metrics();
            let space = if i == 0 { 0.0 } else { metrics.measure_str(" ", size) };
            space + metrics.measure_str(&word.text, size)
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(text: &str) -> Vec<Word> {
        text.split_whitespace()
            .map(|w| Word {
                text: w.to_string(),
                font: Font::Helvetica,
            })
            .collect()
    }

    #[test]
    fn test_measure_known_widths() {
        let m = Font::Helvetica.metrics();
        // "Hi" = 722 + 222
        assert!((m.measure_str("Hi", 10.0) - 9.44).abs() < 1e-9);
        assert!(Font::HelveticaBold.metrics().measure_str("Hi", 10.0) > m.measure_str("Hi", 10.0));
    }

    #[test]
    fn test_non_ascii_uses_average() {
        let m = Font::Helvetica.metrics();
        assert!((m.measure_str("é", 10.0) - 5.56).abs() < 1e-9);
    }

    #[test]
    fn test_wrap_respects_width() {
        let text = "We are delighted to extend this offer of employment for the position";
        let lines = wrap_words(&words(text), 10.0, 120.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(line.len() == 1 || line_width(line, 10.0) <= 120.0);
        }
        let rejoined: Vec<String> = lines.concat().into_iter().map(|w| w.text).collect();
        assert_eq!(rejoined.join(" "), text);
    }

    #[test]
    fn test_overlong_word_gets_its_own_line() {
        let lines = wrap_words(&words("a Supercalifragilistic b"), 10.0, 30.0);
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_empty_input() {
        assert!(wrap_words(&[], 10.0, 100.0).is_empty());
    }
}
