// Translation tables for the converter surface

use super::Locale;

/// Symbolic text keys used by the converter surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextKey {
    HeroTitle,
    HeroTitleHighlight,
    HeroSubtitle,
    InputPlaceholder,
    ConvertButton,
    FetchingInfo,
    FormatLabel,
    QualityLabel,
    DownloadButton,
    Converting,
    CutTooltip,
    CutPopupTitle,
    StartTime,
    EndTime,
    ConfirmCut,
    Cancel,
    ErrorInvalidUrl,
    ErrorFetch,
    ErrorConversion,
}

impl TextKey {
    pub const ALL: [TextKey; 19] = [
        TextKey::HeroTitle,
        TextKey::HeroTitleHighlight,
        TextKey::HeroSubtitle,
        TextKey::InputPlaceholder,
        TextKey::ConvertButton,
        TextKey::FetchingInfo,
        TextKey::FormatLabel,
        TextKey::QualityLabel,
        TextKey::DownloadButton,
        TextKey::Converting,
        TextKey::CutTooltip,
        TextKey::CutPopupTitle,
        TextKey::StartTime,
        TextKey::EndTime,
        TextKey::ConfirmCut,
        TextKey::Cancel,
        TextKey::ErrorInvalidUrl,
        TextKey::ErrorFetch,
        TextKey::ErrorConversion,
    ];

    /// Key name, also the last-resort text when no locale maps the key
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HeroTitle => "heroTitle",
            Self::HeroTitleHighlight => "heroTitleHighlight",
            Self::HeroSubtitle => "heroSubtitle",
            Self::InputPlaceholder => "inputPlaceholder",
            Self::ConvertButton => "convertButton",
            Self::FetchingInfo => "fetchingInfo",
            Self::FormatLabel => "formatLabel",
            Self::QualityLabel => "qualityLabel",
            Self::DownloadButton => "downloadButton",
            Self::Converting => "converting",
            Self::CutTooltip => "cutTooltip",
            Self::CutPopupTitle => "cutPopupTitle",
            Self::StartTime => "startTime",
            Self::EndTime => "endTime",
            Self::ConfirmCut => "confirmCut",
            Self::Cancel => "cancel",
            Self::ErrorInvalidUrl => "errorInvalidUrl",
            Self::ErrorFetch => "errorFetch",
            Self::ErrorConversion => "errorConversion",
        }
    }
}

/// Look up text for `key`: requested locale, then the default locale, then the key name.
pub fn translate(locale: Locale, key: TextKey) -> &'static str {
    resolve(key, lookup(locale, key), lookup(Locale::default(), key))
}

fn resolve(key: TextKey, primary: Option<&'static str>, fallback: Option<&'static str>) -> &'static str {
    primary.or(fallback).unwrap_or_else(|| key.as_str())
}

fn lookup(locale: Locale, key: TextKey) -> Option<&'static str> {
    match locale {
        Locale::Pt => portuguese(key),
        Locale::En => english(key),
        Locale::Es => spanish(key),
    }
}

fn portuguese(key: TextKey) -> Option<&'static str> {
    let text = match key {
        TextKey::HeroTitle => "Converta vídeos em",
        TextKey::HeroTitleHighlight => "MP3 e MP4",
        TextKey::HeroSubtitle => "Cole o link do vídeo, escolha o formato e a qualidade e baixe em segundos.",
        TextKey::InputPlaceholder => "Cole o link do vídeo aqui...",
        TextKey::ConvertButton => "Converter",
        TextKey::FetchingInfo => "Buscando informações do vídeo...",
        TextKey::FormatLabel => "Formato",
        TextKey::QualityLabel => "Qualidade",
        TextKey::DownloadButton => "Baixar",
        TextKey::Converting => "Convertendo...",
        TextKey::CutTooltip => "Cortar trecho do vídeo",
        TextKey::CutPopupTitle => "Cortar vídeo",
        TextKey::StartTime => "Início",
        TextKey::EndTime => "Fim",
        TextKey::ConfirmCut => "Confirmar corte",
        TextKey::Cancel => "Cancelar",
        TextKey::ErrorInvalidUrl => "Por favor, insira um link válido do YouTube.",
        TextKey::ErrorFetch => "Não foi possível obter as informações do vídeo. Tente novamente.",
        TextKey::ErrorConversion => "Erro ao converter o vídeo. Tente novamente.",
    };
    Some(text)
}

fn english(key: TextKey) -> Option<&'static str> {
    let text = match key {
        TextKey::HeroTitle => "Convert videos to",
        TextKey::HeroTitleHighlight => "MP3 and MP4",
        TextKey::HeroSubtitle => "Paste the video link, pick a format and quality, and download in seconds.",
        TextKey::InputPlaceholder => "Paste the video link here...",
        TextKey::ConvertButton => "Convert",
        TextKey::FetchingInfo => "Fetching video information...",
        TextKey::FormatLabel => "Format",
        TextKey::QualityLabel => "Quality",
        TextKey::DownloadButton => "Download",
        TextKey::Converting => "Converting...",
        TextKey::CutTooltip => "Cut a segment of the video",
        TextKey::CutPopupTitle => "Cut video",
        TextKey::StartTime => "Start",
        TextKey::EndTime => "End",
        TextKey::ConfirmCut => "Confirm cut",
        TextKey::Cancel => "Cancel",
        TextKey::ErrorInvalidUrl => "Please enter a valid YouTube link.",
        TextKey::ErrorFetch => "Could not fetch the video information. Please try again.",
        TextKey::ErrorConversion => "Error converting the video. Please try again.",
    };
    Some(text)
}

fn spanish(key: TextKey) -> Option<&'static str> {
    let text = match key {
        TextKey::HeroTitle => "Convierte videos a",
        TextKey::HeroTitleHighlight => "MP3 y MP4",
        TextKey::HeroSubtitle => "Pega el enlace del video, elige el formato y la calidad, y descarga en segundos.",
        TextKey::InputPlaceholder => "Pega el enlace del video aquí...",
        TextKey::ConvertButton => "Convertir",
        TextKey::FetchingInfo => "Buscando información del video...",
        TextKey::FormatLabel => "Formato",
        TextKey::QualityLabel => "Calidad",
        TextKey::DownloadButton => "Descargar",
        TextKey::Converting => "Convirtiendo...",
        TextKey::CutTooltip => "Cortar un fragmento del video",
        TextKey::CutPopupTitle => "Cortar video",
        TextKey::StartTime => "Inicio",
        TextKey::EndTime => "Fin",
        TextKey::ConfirmCut => "Confirmar corte",
        TextKey::Cancel => "Cancelar",
        TextKey::ErrorInvalidUrl => "Por favor, introduce un enlace válido de YouTube.",
        TextKey::ErrorFetch => "No se pudo obtener la información del video. Inténtalo de nuevo.",
        TextKey::ErrorConversion => "Error al convertir el video. Inténtalo de nuevo.",
    };
    Some(text)
}
