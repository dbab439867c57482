use std::path::{Path, PathBuf};

use log::error;

use crate::{load_gray, CodecOptions, Method, Payload, Persist, SteganoError};

pub fn prepare() -> HideApi {
    HideApi::default()
}

#[derive(Default, Debug)]
pub struct HideApi {
    message: Option<String>,
    secret_image: Option<PathBuf>,
    image: Option<PathBuf>,
    output: Option<PathBuf>,
    options: CodecOptions,
}

impl HideApi {
    pub fn with_options(mut self, options: CodecOptions) -> Self {
        self.options = options;
        self
    }

    /// Use the default options of the given method
    pub fn with_method(mut self, method: Method) -> Self {
        self.options = CodecOptions::for_method(method);
        self
    }

    pub fn with_message(mut self, message: &str) -> Self {
        self.message = Some(message.to_string());
        self
    }

    pub fn use_message<S: AsRef<str>>(mut self, message: Option<S>) -> Self {
        self.message = message.map(|s| s.as_ref().to_string());
        self
    }

    /// A gray image that is hidden instead of a text message
    pub fn with_secret_image<A: AsRef<Path>>(mut self, secret_image: A) -> Self {
        self.secret_image = Some(secret_image.as_ref().to_path_buf());
        self
    }

    pub fn use_secret_image(mut self, secret_image: Option<PathBuf>) -> Self {
        self.secret_image = secret_image;
        self
    }

    /// The cover image, used readonly
    pub fn with_image<A: AsRef<Path>>(mut self, image: A) -> Self {
        self.image = Some(image.as_ref().to_path_buf());
        self
    }

    pub fn with_output<A: AsRef<Path>>(mut self, output: A) -> Self {
        self.output = Some(output.as_ref().to_path_buf());
        self
    }

    pub fn execute(self) -> Result<(), SteganoError> {
        let payload = self.payload()?;
        let Some(image) = self.image else {
            return Err(SteganoError::CarrierNotSet);
        };
        let Some(output) = self.output else {
            return Err(SteganoError::TargetNotSet);
        };

        let cover = load_gray(&image)?;
        let stego = crate::hide(&cover, &payload, &self.options)?;

        stego.save_as(&output)
    }

    /// exactly one of message or secret image has to be set
    fn payload(&self) -> Result<Payload, SteganoError> {
        match (&self.message, &self.secret_image) {
            (Some(message), None) => Ok(Payload::Text(message.clone())),
            (None, Some(secret)) => {
                let img = image::open(secret).map_err(|e| {
                    error!("Secret image {secret:?} is not readable: {e}");
                    SteganoError::UnsupportedPayloadType
                })?;
                Ok(Payload::Image(img.to_luma8()))
            }
            (Some(_), Some(_)) => Err(SteganoError::UnsupportedPayloadType),
            (None, None) => Err(SteganoError::MissingPayload),
        }
    }
}
