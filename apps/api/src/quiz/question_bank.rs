//! The built-in Python fundamentals quiz that every assessment is graded against.

use crate::models::assessment::Question;

const PYTHON_FUNDAMENTALS: &[(&str, [&str; 4], &str)] = &[
    (
        "What is the output of print(2 + 3 * 4)?",
        ["20", "14", "24", "9"],
        "14",
    ),
    (
        "Which keyword is used to define a function in Python?",
        ["func", "function", "def", "lambda"],
        "def",
    ),
    (
        "What does the len() function do?",
        [
            "Returns the length of a string or list",
            "Converts a value to an integer",
            "Rounds a number",
            "Creates a new list",
        ],
        "Returns the length of a string or list",
    ),
    (
        "Which of these data types is mutable?",
        ["Tuple", "String", "List", "Integer"],
        "List",
    ),
    (
        "How do you write a single-line comment in Python?",
        [
            "// This is a comment",
            "# This is a comment",
            "/* This is a comment */",
            "-- This is a comment",
        ],
        "# This is a comment",
    ),
    (
        "What does an if statement do?",
        [
            "Repeats code forever",
            "Defines a class",
            "Executes code if a condition is true",
            "Imports a module",
        ],
        "Executes code if a condition is true",
    ),
    (
        "Which function writes output to the console?",
        ["echo", "print", "write", "console.log"],
        "print",
    ),
    (
        "What is the value of len([1, 2, 3])?",
        ["2", "3", "4", "6"],
        "3",
    ),
    (
        "Which literal creates an empty list?",
        ["{}", "()", "[]", "''"],
        "[]",
    ),
    (
        "What does the break statement do?",
        [
            "Skips to the next iteration",
            "Ends a loop prematurely",
            "Raises an exception",
            "Pauses execution",
        ],
        "Ends a loop prematurely",
    ),
];

/// The fixed ten-question set, in presentation order.
pub fn python_fundamentals() -> Vec<Question> {
    PYTHON_FUNDAMENTALS
        .iter()
        .map(|(question, options, correct)| Question {
            question: question.to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
            correct: correct.to_string(),
        })
        .collect()
}
