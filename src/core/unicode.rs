//! 유니코드 한글 음절 조합/분해 및 조합형 자모 분류

/// 한글 음절 시작 코드포인트 (가)
pub const HANGUL_SYLLABLE_BASE: u32 = 0xAC00;
/// 한글 음절 마지막 코드포인트 (힣)
pub const HANGUL_SYLLABLE_LAST: u32 = 0xD7A3;

/// 초성 자모 시작 코드포인트 (ᄀ)
pub const CHOSEONG_BASE: u32 = 0x1100;
/// 중성 자모 시작 코드포인트 (ᅡ)
pub const JUNGSEONG_BASE: u32 = 0x1161;
/// 종성 자모 기준 코드포인트 (종성 인덱스 0 = 종성 없음이므로 실제 첫 종성은 +1)
pub const JONGSEONG_BASE: u32 = 0x11A7;

/// 초성 개수
pub const CHOSEONG_COUNT: u32 = 19;
/// 중성 개수
pub const JUNGSEONG_COUNT: u32 = 21;
/// 종성 개수 (종성 없음 포함)
pub const JONGSEONG_COUNT: u32 = 28;

/// 모음만 있는 글자를 만들 때 쓰는 채움 초성 (ᄋ)
pub const FILLER_CHOSEONG: u32 = 0x110B - CHOSEONG_BASE;

/// 조합형 자모 하나의 분류 결과
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JamoClass {
    /// 초성 (인덱스 0~18)
    Choseong(u32),
    /// 중성 (인덱스 0~20)
    Jungseong(u32),
    /// 종성 (인덱스 1~27)
    Jongseong(u32),
}

/// 완성형 한글 음절 여부
pub fn is_hangul_syllable(c: char) -> bool {
    (HANGUL_SYLLABLE_BASE..=HANGUL_SYLLABLE_LAST).contains(&(c as u32))
}

/// 초성/중성/종성 인덱스로 완성된 한글 유니코드 생성
/// - choseong: 초성 인덱스 (0~18)
/// - jungseong: 중성 인덱스 (0~20)
/// - jongseong: 종성 인덱스 (0~27, 0 = 종성 없음)
pub fn compose_syllable(choseong: u32, jungseong: u32, jongseong: u32) -> Option<char> {
    if choseong >= CHOSEONG_COUNT || jungseong >= JUNGSEONG_COUNT || jongseong >= JONGSEONG_COUNT {
        return None;
    }
    let code = HANGUL_SYLLABLE_BASE
        + (choseong * JUNGSEONG_COUNT + jungseong) * JONGSEONG_COUNT
        + jongseong;
    char::from_u32(code)
}

/// 완성형 한글을 초성/중성/종성 인덱스로 분해
/// 반환: (초성 인덱스, 중성 인덱스, 종성 인덱스)
pub fn decompose_syllable(c: char) -> Option<(u32, u32, u32)> {
    if !is_hangul_syllable(c) {
        return None;
    }
    let offset = c as u32 - HANGUL_SYLLABLE_BASE;
    let jongseong = offset % JONGSEONG_COUNT;
    let jungseong = (offset / JONGSEONG_COUNT) % JUNGSEONG_COUNT;
    let choseong = offset / (JUNGSEONG_COUNT * JONGSEONG_COUNT);
    Some((choseong, jungseong, jongseong))
}

/// 초성 인덱스 -> 조합형 초성 자모 (U+1100~)
pub fn choseong_char(cho: u32) -> Option<char> {
    if cho < CHOSEONG_COUNT {
        char::from_u32(CHOSEONG_BASE + cho)
    } else {
        None
    }
}

/// 중성 인덱스 -> 조합형 중성 자모 (U+1161~)
pub fn jungseong_char(jung: u32) -> Option<char> {
    if jung < JUNGSEONG_COUNT {
        char::from_u32(JUNGSEONG_BASE + jung)
    } else {
        None
    }
}

/// 종성 인덱스 -> 조합형 종성 자모 (U+11A8~)
/// 0(종성 없음)은 글자가 없으므로 None
pub fn jongseong_char(jong: u32) -> Option<char> {
    if (1..JONGSEONG_COUNT).contains(&jong) {
        char::from_u32(JONGSEONG_BASE + jong)
    } else {
        None
    }
}

/// 조합형 자모 분류. 호환용 자모(ㄱ, ㅏ 등)나 다른 문자는 None
pub fn classify_jamo(c: char) -> Option<JamoClass> {
    let code = c as u32;
    if (CHOSEONG_BASE..CHOSEONG_BASE + CHOSEONG_COUNT).contains(&code) {
        Some(JamoClass::Choseong(code - CHOSEONG_BASE))
    } else if (JUNGSEONG_BASE..JUNGSEONG_BASE + JUNGSEONG_COUNT).contains(&code) {
        Some(JamoClass::Jungseong(code - JUNGSEONG_BASE))
    } else if (JONGSEONG_BASE + 1..JONGSEONG_BASE + JONGSEONG_COUNT).contains(&code) {
        Some(JamoClass::Jongseong(code - JONGSEONG_BASE))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_syllable() {
        // 가 = 초성 ㄱ(0) + 중성 ㅏ(0) + 종성 없음(0)
        assert_eq!(compose_syllable(0, 0, 0), Some('가'));
        // 한 = 초성 ㅎ(18) + 중성 ㅏ(0) + 종성 ㄴ(4)
        assert_eq!(compose_syllable(18, 0, 4), Some('한'));
        // 힣 = 마지막 음절
        assert_eq!(compose_syllable(18, 20, 27), Some('힣'));
        assert_eq!(compose_syllable(19, 0, 0), None);
        assert_eq!(compose_syllable(0, 21, 0), None);
        assert_eq!(compose_syllable(0, 0, 28), None);
    }

    #[test]
    fn test_decompose_syllable() {
        assert_eq!(decompose_syllable('가'), Some((0, 0, 0)));
        assert_eq!(decompose_syllable('안'), Some((11, 0, 4)));
        assert_eq!(decompose_syllable('글'), Some((0, 18, 8)));
        assert_eq!(decompose_syllable('힣'), Some((18, 20, 27)));

        // 한글 음절이 아닌 문자
        assert_eq!(decompose_syllable('a'), None);
        assert_eq!(decompose_syllable('ㄱ'), None);
        assert_eq!(decompose_syllable('\u{1100}'), None);
    }

    #[test]
    fn test_all_syllables_roundtrip() {
        for code in HANGUL_SYLLABLE_BASE..=HANGUL_SYLLABLE_LAST {
            let c = char::from_u32(code).unwrap();
            let (cho, jung, jong) = decompose_syllable(c).unwrap();
            assert_eq!(compose_syllable(cho, jung, jong), Some(c));
        }
    }

    #[test]
    fn test_jamo_chars() {
        assert_eq!(choseong_char(0), Some('\u{1100}'));
        assert_eq!(choseong_char(11), Some('\u{110B}'));
        assert_eq!(choseong_char(19), None);
        assert_eq!(jungseong_char(0), Some('\u{1161}'));
        assert_eq!(jungseong_char(20), Some('\u{1175}'));
        assert_eq!(jungseong_char(21), None);
        assert_eq!(jongseong_char(0), None);
        assert_eq!(jongseong_char(1), Some('\u{11A8}'));
        assert_eq!(jongseong_char(27), Some('\u{11C2}'));
        assert_eq!(jongseong_char(28), None);
    }

    #[test]
    fn test_classify_jamo() {
        assert_eq!(classify_jamo('\u{1100}'), Some(JamoClass::Choseong(0)));
        assert_eq!(classify_jamo('\u{1112}'), Some(JamoClass::Choseong(18)));
        assert_eq!(classify_jamo('\u{1161}'), Some(JamoClass::Jungseong(0)));
        assert_eq!(classify_jamo('\u{11A8}'), Some(JamoClass::Jongseong(1)));
        assert_eq!(classify_jamo('\u{11C2}'), Some(JamoClass::Jongseong(27)));

        // 종성 기준점 자체와 범위 밖은 자모가 아님
        assert_eq!(classify_jamo('\u{11A7}'), None);
        assert_eq!(classify_jamo('\u{11C3}'), None);
        assert_eq!(classify_jamo('ㄱ'), None);
        assert_eq!(classify_jamo('a'), None);
    }

    #[test]
    fn test_filler_choseong() {
        assert_eq!(choseong_char(FILLER_CHOSEONG), Some('ᄋ'));
    }
}
