use crate::data::models::MessageType;

/// 메시지 끝이 `?`이면 질문, 아니면 서술로 분류합니다.
pub fn message_type(message: &str) -> MessageType {
    if message.ends_with('?') {
        MessageType::Question
    } else {
        MessageType::Statement
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_type() {
        assert_eq!(message_type("hi there?"), MessageType::Question);
        assert_eq!(message_type("?"), MessageType::Question);
        assert_eq!(message_type("hello"), MessageType::Statement);
        assert_eq!(message_type("what? no way"), MessageType::Statement);
        // 뒤쪽 공백은 잘라내지 않음
        assert_eq!(message_type("really? "), MessageType::Statement);
        assert_eq!(message_type(""), MessageType::Statement);
    }
}
