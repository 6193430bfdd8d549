use voice::{ConsoleEar, Ear, HearingError};

#[tokio::test]
async fn typed_lines_are_answers() {
    let ear = ConsoleEar::from_reader(&b"  Alice \n555-1234\n"[..]);
    assert_eq!(ear.listen().await, Ok("Alice".into()));
    assert_eq!(ear.listen().await, Ok("555-1234".into()));
}

#[tokio::test]
async fn blank_line_is_unintelligible() {
    let ear = ConsoleEar::from_reader(&b"\n   \nBob\n"[..]);
    assert_eq!(ear.listen().await, Err(HearingError::Unintelligible));
    assert_eq!(ear.listen().await, Err(HearingError::Unintelligible));
    assert_eq!(ear.listen().await, Ok("Bob".into()));
}

#[tokio::test]
async fn closed_input_is_a_microphone_failure() {
    let ear = ConsoleEar::from_reader(&b"Carol"[..]);
    assert_eq!(ear.listen().await, Ok("Carol".into()));
    assert!(matches!(
        ear.listen().await,
        Err(HearingError::Microphone(_))
    ));
}
