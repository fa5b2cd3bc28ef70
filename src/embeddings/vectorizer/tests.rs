use super::*;

fn norm(vector: &[f32]) -> f32 {
    vector.iter().map(|v| v * v).sum::<f32>().sqrt()
}

#[test]
fn deterministic_output() {
    let vectorizer = HashingVectorizer::default();
    let first = vectorizer.embed("The pool pump requires weekly inspection.");
    let second = vectorizer.embed("The pool pump requires weekly inspection.");
    assert_eq!(first, second);
}

#[test]
fn dimension_invariant() {
    let vectorizer = HashingVectorizer::default();
    assert_eq!(vectorizer.embed("").len(), DEFAULT_DIMENSION);
    assert_eq!(vectorizer.embed("one word").len(), DEFAULT_DIMENSION);

    let long_text = "token ".repeat(10_000);
    assert_eq!(vectorizer.embed(&long_text).len(), DEFAULT_DIMENSION);

    let small = HashingVectorizer::new(8);
    assert_eq!(small.embed("anything at all").len(), 8);
}

#[test]
fn unit_norm_for_substantive_text() {
    let vectorizer = HashingVectorizer::default();
    for text in [
        "alpha",
        "alpha beta gamma",
        "Filter replacement is due monthly.",
        "café naïve über 北京",
    ] {
        let vector = vectorizer.embed(text);
        assert!(
            (norm(&vector) - 1.0).abs() < 1e-6,
            "norm of {:?} should be 1.0, got {}",
            text,
            norm(&vector)
        );
    }
}

#[test]
fn degenerate_input_yields_zero_vector() {
    let vectorizer = HashingVectorizer::default();
    for text in ["", "   ", "\n\n\t", "!!! ??? ---", "…。、"] {
        let vector = vectorizer.embed(text);
        assert!(
            vector.iter().all(|v| *v == 0.0),
            "expected zero vector for {:?}",
            text
        );
    }
}

#[test]
fn single_token_maps_to_single_unit_component() {
    let vectorizer = HashingVectorizer::default();
    let vector = vectorizer.embed("alpha");
    let nonzero: Vec<&f32> = vector.iter().filter(|v| **v != 0.0).collect();
    assert_eq!(nonzero.len(), 1);
    assert!((nonzero[0] - 1.0).abs() < 1e-6);
}

#[test]
fn repeated_token_keeps_direction() {
    let vectorizer = HashingVectorizer::default();
    // Counts scale but normalization collapses repeats of a single token
    // back onto the same unit vector.
    assert_eq!(
        vectorizer.embed("alpha"),
        vectorizer.embed("alpha alpha alpha")
    );
}

#[test]
fn token_order_is_ignored() {
    let vectorizer = HashingVectorizer::default();
    assert_eq!(
        vectorizer.embed("pump pool inspection weekly"),
        vectorizer.embed("weekly inspection pool pump")
    );
}

#[test]
fn case_is_normalized() {
    let vectorizer = HashingVectorizer::default();
    assert_eq!(vectorizer.embed("Pool PUMP"), vectorizer.embed("pool pump"));
}

#[test]
fn punctuation_is_a_token_boundary() {
    let vectorizer = HashingVectorizer::default();
    assert_eq!(
        vectorizer.embed("pool,pump!inspection"),
        vectorizer.embed("pool pump inspection")
    );
}

#[test]
fn underscores_stay_inside_tokens() {
    let vectorizer = HashingVectorizer::default();
    let joined = vectorizer.embed("pool_pump");
    let split = vectorizer.embed("pool pump");
    assert_ne!(joined, split);
}
