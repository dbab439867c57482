use std::fs;
use std::path::{Path, PathBuf};

use crate::{load_gray, CodecOptions, Method, Payload, PayloadShape, Persist, SteganoError};

pub fn prepare() -> UnveilApi {
    UnveilApi::default()
}

#[derive(Default, Debug)]
pub struct UnveilApi {
    secret_media: Option<PathBuf>,
    shape: Option<PayloadShape>,
    output: Option<PathBuf>,
    options: CodecOptions,
}

impl UnveilApi {
    /// Use the given codec options
    pub fn with_options(mut self, options: CodecOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_method(mut self, method: Method) -> Self {
        self.options = CodecOptions::for_method(method);
        self
    }

    /// This is the stego image that contains the data to be unveiled
    pub fn from_secret_file(mut self, secret_image: impl AsRef<Path>) -> Self {
        self.secret_media = Some(secret_image.as_ref().to_path_buf());
        self
    }

    /// The hidden text has `chars` characters
    pub fn expect_text(mut self, chars: usize) -> Self {
        self.shape = Some(PayloadShape::Text { chars });
        self
    }

    /// The hidden image has the given dimensions
    pub fn expect_image(mut self, width: u32, height: u32) -> Self {
        self.shape = Some(PayloadShape::Image { width, height });
        self
    }

    /// Optional file the unveiled payload is written to, PNG for images, plain bytes for text
    pub fn into_output_file(mut self, output: impl AsRef<Path>) -> Self {
        self.output = Some(output.as_ref().to_path_buf());
        self
    }

    /// Execute the unveil process and blocks until it is finished
    pub fn execute(self) -> Result<Payload, SteganoError> {
        let Some(secret_media) = self.secret_media else {
            return Err(SteganoError::CarrierNotSet);
        };
        let Some(shape) = self.shape else {
            return Err(SteganoError::MissingPayload);
        };
        if !self.options.method().supports_unveil() {
            return Err(SteganoError::UnveilNotSupported(self.options.method()));
        }

        let stego = load_gray(&secret_media)?;
        let payload = crate::unveil(&stego, &self.options, shape)?;

        if let Some(output) = self.output {
            match &payload {
                Payload::Image(img) => img.save_as(&output)?,
                Payload::Text(text) => {
                    let bytes: Vec<u8> = text.chars().map(|c| c as u8).collect();
                    fs::write(&output, bytes)
                        .map_err(|source| SteganoError::WriteError { source })?
                }
            }
        }

        Ok(payload)
    }
}
